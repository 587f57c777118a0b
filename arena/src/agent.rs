//! Strategy selection for the arena.
//!
//! Players are a closed set, so they are an enum rather than boxed trait
//! objects: configuration names a [`StrategyKind`], which builds an [`Agent`].

use std::fmt;
use std::str::FromStr;

use alphabeta::{AlphaBetaConfig, AlphaBetaPlayer};
use anyhow::{anyhow, Error, Result};
use engine_core::{Game, GameError, RandomPlayer, Strategy};
use games_hadron::{Board, Coord, HadronEvaluator, Player};
use mcts::{MctsConfig, MctsPlayer, RolloutPolicy};

use crate::config::Config;

/// Strategy names accepted on the command line and in config.toml.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Random,
    AlphaBeta,
    Mcts,
    /// MCTS whose rollouts are driven by alpha-beta
    Hybrid,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Random,
        StrategyKind::AlphaBeta,
        StrategyKind::Mcts,
        StrategyKind::Hybrid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::AlphaBeta => "alphabeta",
            StrategyKind::Mcts => "mcts",
            StrategyKind::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "random" => Ok(StrategyKind::Random),
            "alphabeta" | "alpha_beta" | "minimax" => Ok(StrategyKind::AlphaBeta),
            "mcts" => Ok(StrategyKind::Mcts),
            "hybrid" | "mcts_hybrid" => Ok(StrategyKind::Hybrid),
            other => {
                let known: Vec<&str> = StrategyKind::ALL.iter().map(|k| k.as_str()).collect();
                Err(anyhow!(
                    "unknown strategy '{}', expected one of {}",
                    other,
                    known.join(", ")
                ))
            }
        }
    }
}

/// A configured player.
#[derive(Debug, Clone)]
pub enum Agent {
    Random(RandomPlayer),
    AlphaBeta(AlphaBetaPlayer<HadronEvaluator>),
    Mcts(MctsPlayer<HadronEvaluator>),
}

impl Agent {
    /// Build a player of `kind` from the arena settings.
    ///
    /// `seed` fixes the player's RNG; `None` draws from the OS.
    pub fn build(kind: StrategyKind, config: &Config, seed: Option<u64>) -> Result<Self> {
        let evaluator = config.evaluator()?;
        let agent = match kind {
            StrategyKind::Random => Agent::Random(match seed {
                Some(seed) => RandomPlayer::with_seed(seed),
                None => RandomPlayer::new(),
            }),
            StrategyKind::AlphaBeta => {
                let search = match config.max_depth {
                    0 => AlphaBetaConfig::exact(),
                    depth => AlphaBetaConfig::heuristic(depth),
                };
                Agent::AlphaBeta(AlphaBetaPlayer::new(search, evaluator))
            }
            StrategyKind::Mcts => {
                let search = mcts_config(config, config.rollout_policy()?, seed);
                Agent::Mcts(MctsPlayer::new(search, evaluator))
            }
            StrategyKind::Hybrid => {
                let rollout = RolloutPolicy::AlphaBeta {
                    depth: config.hybrid_depth,
                };
                Agent::Mcts(MctsPlayer::new(mcts_config(config, rollout, seed), evaluator))
            }
        };
        Ok(agent)
    }

    /// Search effort so far: alpha-beta nodes or MCTS simulations.
    pub fn search_effort(&self) -> u64 {
        match self {
            Agent::Random(_) => 0,
            Agent::AlphaBeta(player) => player.total_nodes(),
            Agent::Mcts(player) => player.stats().simulations,
        }
    }
}

fn mcts_config(config: &Config, rollout: RolloutPolicy, seed: Option<u64>) -> MctsConfig {
    let mut search = MctsConfig {
        budget: config.budget(),
        exploration: config.exploration,
        rollout,
        threads: config.threads,
        seed: None,
    };
    if let Some(seed) = seed {
        search = search.with_seed(seed);
    }
    search
}

impl<G> Strategy<G> for Agent
where
    G: Game<State = Board, Move = Coord, Player = Player>,
{
    fn name(&self) -> &str {
        match self {
            Agent::Random(player) => Strategy::<G>::name(player),
            Agent::AlphaBeta(player) => Strategy::<G>::name(player),
            Agent::Mcts(player) => Strategy::<G>::name(player),
        }
    }

    fn choose_move(&mut self, game: &G, state: &Board) -> Result<Coord, GameError> {
        match self {
            Agent::Random(player) => player.choose_move(game, state),
            Agent::AlphaBeta(player) => player.choose_move(game, state),
            Agent::Mcts(player) => player.choose_move(game, state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::base_config;
    use games_hadron::Hadron;

    #[test]
    fn test_parse_strategy_kinds() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.as_str().parse::<StrategyKind>().unwrap(), kind);
        }
        assert_eq!("Alpha-Beta".parse::<StrategyKind>().unwrap(), StrategyKind::AlphaBeta);
        assert!("oracle".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_agent_names() {
        let config = base_config();
        let name = |kind| {
            let agent = Agent::build(kind, &config, Some(1)).unwrap();
            Strategy::<Hadron>::name(&agent).to_string()
        };
        assert_eq!(name(StrategyKind::Random), "random");
        assert_eq!(name(StrategyKind::AlphaBeta), "alphabeta(d=2)");
        assert_eq!(name(StrategyKind::Mcts), "mcts");
        assert_eq!(name(StrategyKind::Hybrid), "mcts-hybrid(d=1)");
    }

    #[test]
    fn test_zero_depth_builds_exact_search() {
        let mut config = base_config();
        config.max_depth = 0;
        match Agent::build(StrategyKind::AlphaBeta, &config, None).unwrap() {
            Agent::AlphaBeta(player) => assert!(player.config().is_exact()),
            other => panic!("unexpected agent {other:?}"),
        }
    }

    #[test]
    fn test_every_agent_plays_legal_moves() {
        let config = base_config();
        let game = Hadron::new(4, 4).unwrap();
        let state = game.initial();
        for kind in StrategyKind::ALL {
            let mut agent = Agent::build(kind, &config, Some(3)).unwrap();
            let mv = agent.choose_move(&game, &state).unwrap();
            assert!(game.actions(&state).contains(&mv), "{kind} played {mv}");
        }
    }

    #[test]
    fn test_search_effort_is_tracked() {
        let config = base_config();
        let game = Hadron::new(4, 4).unwrap();
        let mut agent = Agent::build(StrategyKind::Mcts, &config, Some(3)).unwrap();
        assert_eq!(agent.search_effort(), 0);
        agent.choose_move(&game, &game.initial()).unwrap();
        assert_eq!(agent.search_effort(), 50);
    }
}
