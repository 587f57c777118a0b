//! Strategy adapter around [`AlphaBetaSearch`].

use engine_core::{Evaluator, Game, GameError, Strategy};

use crate::config::AlphaBetaConfig;
use crate::search::AlphaBetaSearch;

/// Plays the move chosen by a fresh alpha-beta search each turn.
#[derive(Debug, Clone)]
pub struct AlphaBetaPlayer<E> {
    config: AlphaBetaConfig,
    evaluator: E,
    name: String,
    nodes: u64,
}

impl<E> AlphaBetaPlayer<E> {
    pub fn new(config: AlphaBetaConfig, evaluator: E) -> Self {
        let name = match config.max_depth {
            None => "alphabeta".to_string(),
            Some(depth) => format!("alphabeta(d={depth})"),
        };
        Self {
            config,
            evaluator,
            name,
            nodes: 0,
        }
    }

    pub fn config(&self) -> &AlphaBetaConfig {
        &self.config
    }

    /// Positions visited across every search made by this player.
    pub fn total_nodes(&self) -> u64 {
        self.nodes
    }
}

impl<G: Game, E: Evaluator<G>> Strategy<G> for AlphaBetaPlayer<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, game: &G, state: &G::State) -> Result<G::Move, GameError> {
        let result = AlphaBetaSearch::new(game, &self.evaluator, self.config)?.run(state)?;
        self.nodes += result.nodes;
        Ok(result.action)
    }
}
