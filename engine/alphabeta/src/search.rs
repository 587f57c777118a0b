//! Minimax search with alpha-beta pruning.
//!
//! The player to move at the root is the maximizing player; every value in
//! the search is expressed from that player's point of view. Moves are tried
//! in the game's canonical order and a move only replaces the current best
//! when it is strictly better, so ties go to the earliest move.

use std::time::{Duration, Instant};

use engine_core::{Evaluator, Game, GameError, NEG_INF, POS_INF};
use tracing::debug;

use crate::config::AlphaBetaConfig;

/// Result of an alpha-beta search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    /// Best move for the player to move at the root
    pub action: M,

    /// Value of that move for the root player
    pub value: i32,

    /// Positions visited, root included
    pub nodes: u64,

    /// Wall-clock time spent searching
    pub elapsed: Duration,
}

/// Alpha-beta search state for a single root position.
pub struct AlphaBetaSearch<'a, G: Game, E: Evaluator<G> + ?Sized> {
    game: &'a G,
    evaluator: &'a E,
    config: AlphaBetaConfig,
    nodes: u64,
}

impl<'a, G: Game, E: Evaluator<G> + ?Sized> AlphaBetaSearch<'a, G, E> {
    pub fn new(
        game: &'a G,
        evaluator: &'a E,
        config: AlphaBetaConfig,
    ) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            game,
            evaluator,
            config,
            nodes: 0,
        })
    }

    /// Search `state` and return the best move for the player to move.
    pub fn run(&mut self, state: &G::State) -> Result<SearchResult<G::Move>, GameError> {
        if self.game.is_terminal(state) {
            return Err(GameError::InvalidState(
                "cannot search from a terminal position".into(),
            ));
        }

        let start = Instant::now();
        self.nodes = 0;
        let player = self.game.to_move(state);

        let (value, action) = self.max_value(state, player, NEG_INF, POS_INF, 0);
        let action = action.ok_or_else(|| {
            GameError::InvalidState("position has no legal moves".into())
        })?;

        let result = SearchResult {
            action,
            value,
            nodes: self.nodes,
            elapsed: start.elapsed(),
        };

        debug!(
            player = %player,
            action = %result.action,
            value = result.value,
            nodes = result.nodes,
            depth = ?self.config.max_depth,
            pruning = self.config.pruning,
            evaluator = self.evaluator.name(),
            elapsed_ms = result.elapsed.as_millis() as u64,
            "Alpha-beta search complete"
        );

        Ok(result)
    }

    /// Positions visited by the last [`AlphaBetaSearch::run`].
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Terminal or cutoff score, `None` if the node must be expanded.
    fn leaf_value(&self, state: &G::State, player: G::Player, depth: u32) -> Option<i32> {
        if self.game.is_terminal(state) {
            return Some(self.game.utility(state, player));
        }
        match self.config.max_depth {
            Some(max_depth) if depth >= max_depth => {
                Some(self.evaluator.evaluate(self.game, state, player))
            }
            _ => None,
        }
    }

    fn max_value(
        &mut self,
        state: &G::State,
        player: G::Player,
        mut alpha: i32,
        beta: i32,
        depth: u32,
    ) -> (i32, Option<G::Move>) {
        self.nodes += 1;
        if let Some(value) = self.leaf_value(state, player, depth) {
            return (value, None);
        }

        let mut best_value = NEG_INF;
        let mut best_move = None;
        for mv in self.game.actions(state) {
            let child = self.game.apply_unchecked(state, mv);
            let (value, _) = self.min_value(&child, player, alpha, beta, depth + 1);
            if value > best_value || best_move.is_none() {
                best_value = value;
                best_move = Some(mv);
                alpha = alpha.max(best_value);
            }
            if self.config.pruning && best_value >= beta {
                break;
            }
        }
        (best_value, best_move)
    }

    fn min_value(
        &mut self,
        state: &G::State,
        player: G::Player,
        alpha: i32,
        mut beta: i32,
        depth: u32,
    ) -> (i32, Option<G::Move>) {
        self.nodes += 1;
        if let Some(value) = self.leaf_value(state, player, depth) {
            return (value, None);
        }

        let mut best_value = POS_INF;
        let mut best_move = None;
        for mv in self.game.actions(state) {
            let child = self.game.apply_unchecked(state, mv);
            let (value, _) = self.max_value(&child, player, alpha, beta, depth + 1);
            if value < best_value || best_move.is_none() {
                best_value = value;
                best_move = Some(mv);
                beta = beta.min(best_value);
            }
            if self.config.pruning && best_value <= alpha {
                break;
            }
        }
        (best_value, best_move)
    }
}

/// Convenience function to run a single alpha-beta search.
pub fn alphabeta_search<G: Game, E: Evaluator<G> + ?Sized>(
    game: &G,
    state: &G::State,
    config: AlphaBetaConfig,
    evaluator: &E,
) -> Result<SearchResult<G::Move>, GameError> {
    AlphaBetaSearch::new(game, evaluator, config)?.run(state)
}
