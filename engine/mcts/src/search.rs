//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: descend through fully expanded nodes by UCB1
//! 2. Expansion: add one child for a random untried move
//! 3. Simulation: play the child out with the configured rollout policy
//! 4. Backpropagation: update statistics along the path, flipping sign per ply
//!
//! With `threads > 1` the search runs root-parallel: independent trees with
//! their own seeded RNGs whose root statistics are merged before choosing.

use std::collections::BTreeMap;
use std::thread;
use std::time::{Duration, Instant};

use engine_core::{terminal_reward, Evaluator, Game, GameError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::config::{Budget, MctsConfig};
use crate::node::NodeId;
use crate::rollout::{rollout, Rollout};
use crate::tree::{robust_child, ChildStats, MctsTree};

/// Result of an MCTS search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    /// Best action to take
    pub action: M,

    /// Mean reward of that action for the player to move at the root
    pub value: f64,

    /// Visit count of every expanded root move, in move order
    pub visits: Vec<(M, u32)>,

    /// Number of simulations performed (summed over trees)
    pub simulations: u32,

    /// Wall-clock time spent searching
    pub elapsed: Duration,
}

/// Counters accumulated over one or more searches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Completed searches
    pub searches: u64,
    /// Completed select/expand/simulate/backpropagate cycles
    pub simulations: u64,
    /// Simulations that reached a terminal node without a rollout
    pub terminal_hits: u64,
    /// Moves played inside rollouts
    pub rollout_plies: u64,
    /// Nodes allocated across all trees
    pub tree_nodes: u64,
    /// Time spent searching
    pub elapsed: Duration,
}

impl SearchStats {
    /// Fold another set of counters into this one.
    pub fn add(&mut self, other: &SearchStats) {
        self.searches += other.searches;
        self.simulations += other.simulations;
        self.terminal_hits += other.terminal_hits;
        self.rollout_plies += other.rollout_plies;
        self.tree_nodes += other.tree_nodes;
        self.elapsed += other.elapsed;
    }

    /// Simulations per second over the recorded time.
    pub fn simulations_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.simulations as f64 / secs
        } else {
            0.0
        }
    }
}

/// MCTS search state for a single tree.
pub struct MctsSearch<'a, G: Game, E: Evaluator<G> + ?Sized> {
    tree: MctsTree<G>,
    game: &'a G,
    evaluator: &'a E,
    config: MctsConfig,
    stats: SearchStats,
}

impl<'a, G: Game, E: Evaluator<G> + ?Sized> MctsSearch<'a, G, E> {
    /// Create a new MCTS search rooted at `state`.
    pub fn new(
        game: &'a G,
        evaluator: &'a E,
        config: MctsConfig,
        state: &G::State,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if game.is_terminal(state) {
            return Err(GameError::InvalidState(
                "cannot search from a terminal position".into(),
            ));
        }
        let untried = game.actions(state);
        if untried.is_empty() {
            return Err(GameError::InvalidState("position has no legal moves".into()));
        }

        Ok(Self {
            tree: MctsTree::new(state.clone(), untried, false),
            game,
            evaluator,
            config,
            stats: SearchStats::default(),
        })
    }

    /// Run simulations until the budget is spent and pick the robust child.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<G::Move>, GameError> {
        let start = Instant::now();
        self.grow(rng)?;

        let best = self
            .tree
            .best_child()
            .ok_or_else(|| GameError::InvalidState("search expanded no moves".into()))?;
        let mut children = self.tree.root_children();
        children.sort_by(|a, b| a.action.cmp(&b.action));

        let result = SearchResult {
            action: best.action,
            value: best.mean_reward(),
            visits: children.iter().map(|c| (c.action, c.visits)).collect(),
            simulations: self.tree.get(self.tree.root()).visit_count,
            elapsed: start.elapsed(),
        };

        let tree_stats = self.tree.stats();
        debug!(
            action = %result.action,
            value = result.value,
            simulations = result.simulations,
            tree_nodes = tree_stats.total_nodes,
            max_depth = tree_stats.max_depth,
            rollout = self.config.rollout.as_str(),
            elapsed_ms = result.elapsed.as_millis() as u64,
            "MCTS search complete"
        );

        Ok(result)
    }

    /// Run simulations until the budget is spent. Returns the number run.
    fn grow(&mut self, rng: &mut ChaCha20Rng) -> Result<u32, GameError> {
        let start = Instant::now();
        let mut simulations = 0u32;
        loop {
            self.simulate(rng)?;
            simulations += 1;

            let exhausted = match self.config.budget {
                Budget::Iterations(n) => simulations >= n,
                Budget::Time(limit) => start.elapsed() >= limit,
            };
            if exhausted {
                break;
            }
        }

        self.stats.searches += 1;
        self.stats.simulations += u64::from(simulations);
        self.stats.tree_nodes += self.tree.len() as u64;
        self.stats.elapsed += start.elapsed();
        Ok(simulations)
    }

    /// Run a single simulation (select -> expand -> simulate -> backpropagate).
    fn simulate(&mut self, rng: &mut ChaCha20Rng) -> Result<(), GameError> {
        let mut leaf_id = self.select();

        let leaf = self.tree.get(leaf_id);
        if !leaf.is_terminal && !leaf.untried.is_empty() {
            leaf_id = self.expand(leaf_id, rng);
        }

        let leaf = self.tree.get(leaf_id);
        // Root is never the leaf here: it is non-terminal and always expands.
        let perspective = leaf
            .mover
            .unwrap_or_else(|| self.game.opponent(self.game.to_move(&leaf.state)));

        let outcome = if leaf.is_terminal {
            self.stats.terminal_hits += 1;
            Rollout {
                reward: f64::from(terminal_reward(self.game.utility(&leaf.state, perspective))),
                plies: 0,
            }
        } else {
            rollout(
                self.game,
                &leaf.state,
                perspective,
                self.config.rollout,
                self.evaluator,
                rng,
            )?
        };
        self.stats.rollout_plies += u64::from(outcome.plies);

        self.tree.backpropagate(leaf_id, outcome.reward);

        trace!(
            leaf = leaf_id.0,
            reward = outcome.reward,
            rollout_plies = outcome.plies,
            "MCTS simulation complete"
        );

        Ok(())
    }

    /// Descend from the root while nodes are fully expanded and non-terminal.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if node.is_leaf() {
                break;
            }
            match self.tree.select_child(current, self.config.exploration) {
                Some(child_id) => current = child_id,
                None => break,
            }
        }

        current
    }

    /// Expand one untried move of `node_id`, chosen uniformly at random.
    fn expand(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) -> NodeId {
        let node = self.tree.get_mut(node_id);
        let index = rng.gen_range(0..node.untried.len());
        let action = node.untried.swap_remove(index);

        let mover = self.game.to_move(&node.state);
        let state = self.game.apply_unchecked(&node.state, action);
        let untried = self.game.actions(&state);
        let is_terminal = self.game.is_terminal(&state);

        self.tree
            .add_child(node_id, action, mover, state, untried, is_terminal)
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G> {
        &self.tree
    }

    /// Counters for the searches run so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

/// Run a search with `config.threads` trees and return the chosen move.
pub fn run_mcts<G: Game, E: Evaluator<G> + ?Sized>(
    game: &G,
    state: &G::State,
    config: MctsConfig,
    evaluator: &E,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<G::Move>, GameError> {
    run_mcts_with_stats(game, state, config, evaluator, rng).map(|(result, _)| result)
}

/// [`run_mcts`] that also reports the search counters.
pub fn run_mcts_with_stats<G: Game, E: Evaluator<G> + ?Sized>(
    game: &G,
    state: &G::State,
    config: MctsConfig,
    evaluator: &E,
    rng: &mut ChaCha20Rng,
) -> Result<(SearchResult<G::Move>, SearchStats), GameError> {
    if config.threads > 1 {
        let base_seed: u64 = rng.gen();
        return run_root_parallel(game, state, config, evaluator, base_seed);
    }
    let mut search = MctsSearch::new(game, evaluator, config, state)?;
    let result = search.run(rng)?;
    Ok((result, search.stats))
}

/// Grow one independent tree per thread and merge the root statistics.
///
/// Thread `i` is seeded with `base_seed + i`, and results are merged in
/// thread order, so the outcome depends only on `base_seed`.
pub fn run_root_parallel<G: Game, E: Evaluator<G> + ?Sized>(
    game: &G,
    state: &G::State,
    config: MctsConfig,
    evaluator: &E,
    base_seed: u64,
) -> Result<(SearchResult<G::Move>, SearchStats), GameError> {
    config.validate()?;
    let start = Instant::now();
    let threads = config.threads;

    let outcomes: Vec<Result<(Vec<ChildStats<G::Move>>, SearchStats), GameError>> =
        thread::scope(|scope| {
            let handles: Vec<_> = (0..threads)
                .map(|index| {
                    let config = config.clone();
                    scope.spawn(move || {
                        let mut rng =
                            ChaCha20Rng::seed_from_u64(base_seed.wrapping_add(index as u64));
                        let mut search = MctsSearch::new(game, evaluator, config, state)?;
                        search.grow(&mut rng)?;
                        Ok((search.tree.root_children(), search.stats))
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        });

    let mut merged: BTreeMap<G::Move, (u32, f64)> = BTreeMap::new();
    let mut stats = SearchStats::default();
    for outcome in outcomes {
        let (children, tree_stats) = outcome?;
        for child in children {
            let entry = merged.entry(child.action).or_insert((0, 0.0));
            entry.0 += child.visits;
            entry.1 += child.reward_sum;
        }
        stats.add(&tree_stats);
    }

    let children: Vec<ChildStats<G::Move>> = merged
        .into_iter()
        .map(|(action, (visits, reward_sum))| ChildStats {
            action,
            visits,
            reward_sum,
        })
        .collect();
    let best = robust_child(&children)
        .ok_or_else(|| GameError::InvalidState("search expanded no moves".into()))?;

    let result = SearchResult {
        action: best.action,
        value: best.mean_reward(),
        visits: children.iter().map(|c| (c.action, c.visits)).collect(),
        simulations: children.iter().map(|c| c.visits).sum(),
        elapsed: start.elapsed(),
    };

    debug!(
        action = %result.action,
        value = result.value,
        simulations = result.simulations,
        threads,
        tree_nodes = stats.tree_nodes,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "Root-parallel MCTS search complete"
    );

    Ok((result, stats))
}
