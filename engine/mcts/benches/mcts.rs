//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full MCTS search with varying iteration counts
//! - Pure versus alpha-beta guided rollouts
//! - Root-parallel scaling
//! - Tree operations (selection, backpropagation, robust-child choice)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use engine_core::{Game, TerminalEvaluator};
use games_hadron::{Board, Coord, Hadron, HadronEvaluator, Player};
use mcts::{run_mcts, MctsConfig, MctsTree, RolloutPolicy};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Game and empty board of the given size.
fn setup(width: usize, height: usize) -> (Hadron, Board) {
    let game = Hadron::new(width, height).unwrap();
    let root = game.initial();
    (game, root)
}

/// A root with nine children carrying varied statistics.
fn populated_tree() -> MctsTree<Hadron> {
    let (game, root) = setup(3, 3);
    let moves = game.actions(&root);
    let mut tree = MctsTree::new(root.clone(), Vec::new(), false);

    for (i, &mv) in moves.iter().enumerate() {
        let state = game.apply_unchecked(&root, mv);
        let child_id = tree.add_child(tree.root(), mv, Player::Red, state, Vec::new(), false);
        let child = tree.get_mut(child_id);
        child.visit_count = (i as u32 + 1) * 10;
        child.reward_sum = (i as f64 - 4.0) * 0.1 * child.visit_count as f64;
    }
    tree.get_mut(tree.root()).visit_count = 450;
    tree
}

// =============================================================================
// Full MCTS Search Benchmarks
// =============================================================================

fn bench_mcts_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_iterations");

    for iterations in [100u32, 400, 1600] {
        group.throughput(Throughput::Elements(iterations as u64));
        group.bench_with_input(
            BenchmarkId::new("hadron_5x5", iterations),
            &iterations,
            |b, &iterations| {
                let (game, root) = setup(5, 5);
                let config = MctsConfig::for_testing().with_iterations(iterations);

                b.iter(|| {
                    let mut rng = ChaCha20Rng::seed_from_u64(42);
                    black_box(
                        run_mcts(&game, &root, config.clone(), &TerminalEvaluator, &mut rng)
                            .unwrap(),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_rollout_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_rollout_policies");
    group.sample_size(10);
    let iterations = 100u32;

    let policies = [
        RolloutPolicy::Random,
        RolloutPolicy::AlphaBeta { depth: 1 },
        RolloutPolicy::AlphaBeta { depth: 2 },
    ];
    for policy in policies {
        let id = match policy {
            RolloutPolicy::Random => "random".to_string(),
            RolloutPolicy::AlphaBeta { depth } => format!("alphabeta_d{depth}"),
        };
        group.bench_function(id, |b| {
            let (game, root) = setup(5, 5);
            let config = MctsConfig::for_testing()
                .with_iterations(iterations)
                .with_rollout(policy);

            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(
                    run_mcts(
                        &game,
                        &root,
                        config.clone(),
                        &HadronEvaluator::StableParity,
                        &mut rng,
                    )
                    .unwrap(),
                )
            });
        });
    }

    group.finish();
}

fn bench_root_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_root_parallel");
    let iterations = 400u32;

    for threads in [1usize, 2, 4] {
        group.throughput(Throughput::Elements(iterations as u64 * threads as u64));
        group.bench_with_input(BenchmarkId::new("threads", threads), &threads, |b, &threads| {
            let (game, root) = setup(6, 6);
            let config = MctsConfig::for_testing()
                .with_iterations(iterations)
                .with_threads(threads);

            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(
                    run_mcts(&game, &root, config.clone(), &TerminalEvaluator, &mut rng).unwrap(),
                )
            });
        });
    }

    group.finish();
}

// =============================================================================
// Tree Operation Benchmarks
// =============================================================================

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_tree_ops");

    // Benchmark node allocation
    group.bench_function("allocate_node", |b| {
        let (game, root) = setup(5, 5);
        let moves = game.actions(&root);

        b.iter(|| {
            let mut tree = MctsTree::<Hadron>::new(root.clone(), Vec::new(), false);
            for &mv in &moves {
                let state = game.apply_unchecked(&root, mv);
                let untried = game.actions(&state);
                tree.add_child(tree.root(), mv, Player::Red, state, untried, false);
            }
            black_box(tree.len())
        });
    });

    // Benchmark child selection (UCB calculation)
    group.bench_function("select_child", |b| {
        let tree = populated_tree();
        b.iter(|| black_box(tree.select_child(tree.root(), std::f64::consts::SQRT_2)));
    });

    // Benchmark backpropagation
    group.bench_function("backpropagate_depth_5", |b| {
        b.iter_batched(
            || {
                let (game, mut state) = setup(5, 5);
                let mut tree = MctsTree::<Hadron>::new(state.clone(), Vec::new(), false);
                let mut parent = tree.root();

                for i in 0..5 {
                    let mv = Coord::new(i, i);
                    let mover = state.to_move();
                    state = game.apply_unchecked(&state, mv);
                    parent = tree.add_child(parent, mv, mover, state.clone(), Vec::new(), false);
                }

                (tree, parent)
            },
            |(mut tree, leaf)| {
                tree.backpropagate(leaf, 1.0);
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    // Benchmark robust-child choice
    group.bench_function("best_child", |b| {
        let tree = populated_tree();
        b.iter(|| black_box(tree.best_child()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mcts_search_iterations,
    bench_rollout_policies,
    bench_root_parallel,
    bench_tree_operations,
);
criterion_main!(benches);
