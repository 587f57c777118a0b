//! MCTS configuration parameters.

use std::time::Duration;

use engine_core::GameError;

/// When a search stops. Checked after every complete simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Run exactly this many simulations.
    Iterations(u32),
    /// Keep simulating until this much wall-clock time has passed.
    Time(Duration),
}

/// How a simulation plays out from a newly expanded node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RolloutPolicy {
    /// Uniformly random legal moves.
    #[default]
    Random,
    /// Each ply is chosen by a depth-limited alpha-beta search.
    AlphaBeta { depth: u32 },
}

impl RolloutPolicy {
    /// Parse a configuration name; `depth` is only used by `alphabeta`.
    pub fn from_name(name: &str, depth: u32) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "random" => Some(Self::Random),
            "alphabeta" | "alpha_beta" | "hybrid" => Some(Self::AlphaBeta { depth }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::AlphaBeta { .. } => "alphabeta",
        }
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Simulation count or time limit per search.
    pub budget: Budget,

    /// Exploration constant `C` in UCB1:
    /// `mean + C * sqrt(ln(parent_visits) / child_visits)`.
    /// Higher values favour rarely tried moves. Default is sqrt(2).
    pub exploration: f64,

    /// Simulation policy.
    pub rollout: RolloutPolicy,

    /// Independent trees searched in parallel and merged at the root.
    /// 1 keeps the search on the calling thread.
    pub threads: usize,

    /// Seed for players that own their RNG. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            budget: Budget::Iterations(1000),
            exploration: std::f64::consts::SQRT_2,
            rollout: RolloutPolicy::Random,
            threads: 1,
            seed: None,
        }
    }
}

impl MctsConfig {
    /// Create a fast, reproducible config for testing.
    pub fn for_testing() -> Self {
        Self {
            budget: Budget::Iterations(200),
            seed: Some(42),
            ..Self::default()
        }
    }

    /// Builder pattern: run a fixed number of simulations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.budget = Budget::Iterations(n);
        self
    }

    /// Builder pattern: search for a fixed wall-clock time.
    pub fn with_time_budget(mut self, limit: Duration) -> Self {
        self.budget = Budget::Time(limit);
        self
    }

    /// Builder pattern: set the UCB1 exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the rollout policy.
    pub fn with_rollout(mut self, rollout: RolloutPolicy) -> Self {
        self.rollout = rollout;
        self
    }

    /// Builder pattern: set the number of root-parallel trees.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Builder pattern: fix the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        match self.budget {
            Budget::Iterations(0) => {
                return Err(GameError::InvalidConfig(
                    "MCTS needs at least one iteration".into(),
                ))
            }
            Budget::Time(limit) if limit.is_zero() => {
                return Err(GameError::InvalidConfig(
                    "MCTS time budget must be positive".into(),
                ))
            }
            _ => {}
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration
            )));
        }
        if self.threads == 0 {
            return Err(GameError::InvalidConfig(
                "MCTS needs at least one thread".into(),
            ));
        }
        if self.rollout == (RolloutPolicy::AlphaBeta { depth: 0 }) {
            return Err(GameError::InvalidConfig(
                "alpha-beta rollout depth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.budget, Budget::Iterations(1000));
        assert!((config.exploration - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(config.rollout, RolloutPolicy::Random);
        assert_eq!(config.threads, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_iterations(100)
            .with_exploration(0.5)
            .with_rollout(RolloutPolicy::AlphaBeta { depth: 2 })
            .with_threads(4)
            .with_seed(7);

        assert_eq!(config.budget, Budget::Iterations(100));
        assert!((config.exploration - 0.5).abs() < 1e-12);
        assert_eq!(config.rollout, RolloutPolicy::AlphaBeta { depth: 2 });
        assert_eq!(config.threads, 4);
        assert_eq!(config.seed, Some(7));

        let timed = config.with_time_budget(Duration::from_millis(50));
        assert_eq!(timed.budget, Budget::Time(Duration::from_millis(50)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(MctsConfig::default().with_iterations(0).validate().is_err());
        assert!(MctsConfig::default()
            .with_time_budget(Duration::ZERO)
            .validate()
            .is_err());
        assert!(MctsConfig::default().with_exploration(-1.0).validate().is_err());
        assert!(MctsConfig::default()
            .with_exploration(f64::NAN)
            .validate()
            .is_err());
        assert!(MctsConfig::default().with_threads(0).validate().is_err());
        assert!(MctsConfig::default()
            .with_rollout(RolloutPolicy::AlphaBeta { depth: 0 })
            .validate()
            .is_err());
    }

    #[test]
    fn test_rollout_names() {
        assert_eq!(RolloutPolicy::from_name("random", 3), Some(RolloutPolicy::Random));
        assert_eq!(
            RolloutPolicy::from_name("AlphaBeta", 3),
            Some(RolloutPolicy::AlphaBeta { depth: 3 })
        );
        assert_eq!(RolloutPolicy::from_name("greedy", 3), None);
    }
}
