//! Alpha-beta configuration parameters.

use engine_core::GameError;

/// Configuration for minimax search with alpha-beta pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaBetaConfig {
    /// Plies of lookahead before the evaluator is consulted.
    /// `None` searches every line to the end of the game.
    pub max_depth: Option<u32>,

    /// Cut off branches that cannot change the result.
    /// Disabling this yields plain minimax with the same answer.
    pub pruning: bool,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self::exact()
    }
}

impl AlphaBetaConfig {
    /// Full-depth search: only terminal states are scored.
    pub fn exact() -> Self {
        Self {
            max_depth: None,
            pruning: true,
        }
    }

    /// Depth-limited search scored by a heuristic at the cutoff.
    pub fn heuristic(depth: u32) -> Self {
        Self::exact().with_depth(depth)
    }

    /// Builder pattern: set the cutoff depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Builder pattern: turn pruning off.
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }

    pub fn is_exact(&self) -> bool {
        self.max_depth.is_none()
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.max_depth == Some(0) {
            return Err(GameError::InvalidConfig(
                "alpha-beta depth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
