//! Simulation policies used to score a freshly expanded node.

use alphabeta::{AlphaBetaConfig, AlphaBetaSearch};
use engine_core::{terminal_reward, Evaluator, Game, GameError};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::config::RolloutPolicy;

/// Outcome of one playout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rollout {
    /// +1 / -1 / 0 for the player the rollout was scored for
    pub reward: f64,
    /// Moves played before reaching a terminal position
    pub plies: u32,
}

/// Play `state` out with `policy` and score the end for `perspective`.
pub fn rollout<G: Game, E: Evaluator<G> + ?Sized>(
    game: &G,
    state: &G::State,
    perspective: G::Player,
    policy: RolloutPolicy,
    evaluator: &E,
    rng: &mut ChaCha20Rng,
) -> Result<Rollout, GameError> {
    match policy {
        RolloutPolicy::Random => Ok(random_rollout(game, state, perspective, rng)),
        RolloutPolicy::AlphaBeta { depth } => {
            alphabeta_rollout(game, state, perspective, depth, evaluator)
        }
    }
}

/// Uniformly random legal moves until the game ends.
pub fn random_rollout<G: Game>(
    game: &G,
    state: &G::State,
    perspective: G::Player,
    rng: &mut ChaCha20Rng,
) -> Rollout {
    let mut current = state.clone();
    let mut plies = 0;
    while !game.is_terminal(&current) {
        let moves = game.actions(&current);
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        current = game.apply_unchecked(&current, mv);
        plies += 1;
    }
    Rollout {
        reward: f64::from(terminal_reward(game.utility(&current, perspective))),
        plies,
    }
}

/// Every ply chosen by a depth-limited alpha-beta search. Deterministic.
pub fn alphabeta_rollout<G: Game, E: Evaluator<G> + ?Sized>(
    game: &G,
    state: &G::State,
    perspective: G::Player,
    depth: u32,
    evaluator: &E,
) -> Result<Rollout, GameError> {
    let mut search = AlphaBetaSearch::new(game, evaluator, AlphaBetaConfig::heuristic(depth))?;
    let mut current = state.clone();
    let mut plies = 0;
    while !game.is_terminal(&current) {
        let result = search.run(&current)?;
        current = game.apply_unchecked(&current, result.action);
        plies += 1;
    }
    Ok(Rollout {
        reward: f64::from(terminal_reward(game.utility(&current, perspective))),
        plies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_hadron::{Hadron, HadronEvaluator, Player};
    use rand::SeedableRng;

    #[test]
    fn test_random_rollout_reaches_terminal() {
        let game = Hadron::new(4, 4).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..20 {
            let red = random_rollout(&game, &game.initial(), Player::Red, &mut rng);
            assert!(red.reward == 1.0 || red.reward == -1.0);
            assert!(red.plies >= 1 && red.plies <= 16);
        }
    }

    #[test]
    fn test_random_rollout_is_seeded() {
        let game = Hadron::new(5, 5).unwrap();
        let run = |seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            (0..10)
                .map(|_| random_rollout(&game, &game.initial(), Player::Blue, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(3), run(3));
    }

    #[test]
    fn test_rollout_from_terminal_scores_immediately() {
        let game = Hadron::new(1, 1).unwrap();
        let done = game.apply_unchecked(&game.initial(), games_hadron::Coord::new(0, 0));
        let mut rng = ChaCha20Rng::seed_from_u64(0);

        let red = random_rollout(&game, &done, Player::Red, &mut rng);
        assert_eq!(red, Rollout { reward: 1.0, plies: 0 });
        let blue = random_rollout(&game, &done, Player::Blue, &mut rng);
        assert_eq!(blue.reward, -1.0);
    }

    #[test]
    fn test_alphabeta_rollout_is_deterministic_and_zero_sum() {
        let game = Hadron::new(4, 4).unwrap();
        let root = game.initial();
        let eval = HadronEvaluator::StableParity;

        let red = alphabeta_rollout(&game, &root, Player::Red, 2, &eval).unwrap();
        let again = alphabeta_rollout(&game, &root, Player::Red, 2, &eval).unwrap();
        let blue = alphabeta_rollout(&game, &root, Player::Blue, 2, &eval).unwrap();

        assert_eq!(red, again);
        assert_eq!(red.reward, -blue.reward);
        assert!(red.plies >= 1);
    }

    #[test]
    fn test_rollout_dispatch() {
        let game = Hadron::new(3, 3).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let eval = HadronEvaluator::Parity;
        for policy in [RolloutPolicy::Random, RolloutPolicy::AlphaBeta { depth: 1 }] {
            let out = rollout(&game, &game.initial(), Player::Red, policy, &eval, &mut rng).unwrap();
            assert_eq!(out.reward.abs(), 1.0);
        }
    }
}
