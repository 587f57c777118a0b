//! Strategy adapter around [`run_mcts`].

use engine_core::{Evaluator, Game, GameError, Strategy, TerminalEvaluator};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::config::{MctsConfig, RolloutPolicy};
use crate::search::{run_mcts_with_stats, SearchStats};

/// Plays the move chosen by a fresh MCTS search each turn.
///
/// The player owns its RNG, seeded from `config.seed` when set, so a seeded
/// player makes the same choices every game.
#[derive(Debug, Clone)]
pub struct MctsPlayer<E = TerminalEvaluator> {
    config: MctsConfig,
    evaluator: E,
    rng: ChaCha20Rng,
    name: String,
    stats: SearchStats,
}

impl MctsPlayer<TerminalEvaluator> {
    /// Pure-rollout player; the evaluator is never consulted.
    pub fn pure(config: MctsConfig) -> Self {
        Self::new(config, TerminalEvaluator)
    }
}

impl<E> MctsPlayer<E> {
    pub fn new(config: MctsConfig, evaluator: E) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        let name = match config.rollout {
            RolloutPolicy::Random => "mcts".to_string(),
            RolloutPolicy::AlphaBeta { depth } => format!("mcts-hybrid(d={depth})"),
        };
        Self {
            config,
            evaluator,
            rng,
            name,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Counters accumulated over every search made by this player.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

impl<G: Game, E: Evaluator<G>> Strategy<G> for MctsPlayer<E> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, game: &G, state: &G::State) -> Result<G::Move, GameError> {
        let (result, stats) = run_mcts_with_stats(
            game,
            state,
            self.config.clone(),
            &self.evaluator,
            &mut self.rng,
        )?;
        self.stats.add(&stats);

        debug!(
            player = %self.name,
            action = %result.action,
            value = result.value,
            simulations = result.simulations,
            "MCTS selected action"
        );

        Ok(result.action)
    }
}
