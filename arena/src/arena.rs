//! Match loop and call-count report.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use engine_core::{play_game, CallCounts, CountingGame, Game, Strategy};
use games_hadron::{Hadron, Player};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::agent::{Agent, StrategyKind};
use crate::config::Config;
use crate::stats::{MatchStats, MatchStatsSnapshot};

/// Game-model calls made by one strategy choosing an opening move.
#[derive(Debug, Clone)]
pub struct CountReport {
    pub strategy: String,
    pub counts: CallCounts,
}

/// Plays a configured series of games between two strategies.
pub struct Arena {
    config: Config,
    game: Hadron,
    red: StrategyKind,
    blue: StrategyKind,
}

impl Arena {
    pub fn new(config: Config) -> Result<Self> {
        let game = Hadron::new(config.width, config.height)?;
        let red = config.red_kind()?;
        let blue = config.blue_kind()?;
        Ok(Self {
            config,
            game,
            red,
            blue,
        })
    }

    /// Seed for one seat in one game, `None` when unseeded.
    ///
    /// Seats and games get distinct seeds so identical strategies do not
    /// mirror each other.
    fn seat_seed(&self, game_index: u32, player: Player) -> Option<u64> {
        let seat = match player {
            Player::Red => 0,
            Player::Blue => 1,
        };
        self.config
            .seed()
            .map(|base| base.wrapping_add(2 * game_index as u64 + seat))
    }

    /// Play every game and return the final statistics.
    pub fn run(&self) -> Result<MatchStatsSnapshot> {
        let red_name = self.player_name(self.red)?;
        let blue_name = self.player_name(self.blue)?;
        let stats = MatchStats::new(&red_name, &blue_name, self.config.width, self.config.height);

        info!(
            red = %red_name,
            blue = %blue_name,
            games = self.config.games,
            board = format!("{}x{}", self.config.width, self.config.height),
            seed = ?self.config.seed(),
            "Starting match"
        );

        // Progress bar only when stderr is a TTY
        let progress = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            let pb = ProgressBar::new(self.config.games as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} games ({eta})")?
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        for game_index in 0..self.config.games {
            let start = Instant::now();
            let mut red =
                Agent::build(self.red, &self.config, self.seat_seed(game_index, Player::Red))?;
            let mut blue =
                Agent::build(self.blue, &self.config, self.seat_seed(game_index, Player::Blue))?;

            let record = play_game(
                &self.game,
                &mut [(Player::Red, &mut red), (Player::Blue, &mut blue)],
            )
            .with_context(|| format!("game {} failed", game_index + 1))?;

            let winner = record.winner(&self.game);
            stats.record_game(winner, record.plies() as u32, start.elapsed());

            debug!(
                game = game_index + 1,
                winner = ?winner,
                plies = record.plies(),
                red_effort = red.search_effort(),
                blue_effort = blue.search_effort(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Game finished\n{}",
                record.final_state
            );

            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        let snapshot = stats.snapshot();
        info!(
            red = %snapshot.red,
            blue = %snapshot.blue,
            games = snapshot.games_completed,
            red_wins = snapshot.red_wins,
            blue_wins = snapshot.blue_wins,
            avg_plies = format!("{:.1}", snapshot.avg_plies),
            runtime_s = format!("{:.2}", snapshot.runtime_seconds),
            "Match complete"
        );

        if let Some(path) = &self.config.stats_path {
            stats.write_stats(Path::new(path));
        }

        Ok(snapshot)
    }

    /// Let each seat's strategy pick an opening move on a counting game and
    /// report the calls it made.
    pub fn report(&self) -> Result<Vec<CountReport>> {
        let mut kinds = vec![self.red];
        if self.blue != self.red {
            kinds.push(self.blue);
        }

        let mut reports = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let counting = CountingGame::new(self.game);
            let mut agent = Agent::build(kind, &self.config, self.config.seed())?;
            let root = counting.initial();
            let mv = agent.choose_move(&counting, &root)?;
            let report = CountReport {
                strategy: Strategy::<CountingGame<Hadron>>::name(&agent).to_string(),
                counts: counting.counts(),
            };

            info!(
                strategy = %report.strategy,
                opening = %mv,
                "{}",
                report.counts
            );
            reports.push(report);
        }
        Ok(reports)
    }

    fn player_name(&self, kind: StrategyKind) -> Result<String> {
        let agent = Agent::build(kind, &self.config, Some(0))?;
        Ok(Strategy::<Hadron>::name(&agent).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::base_config;
    use tempfile::tempdir;

    #[test]
    fn test_match_plays_every_game() {
        let mut config = base_config();
        config.red = "random".into();
        config.blue = "alphabeta".into();
        config.games = 4;

        let snapshot = Arena::new(config).unwrap().run().unwrap();
        assert_eq!(snapshot.games_completed, 4);
        assert_eq!(snapshot.red_wins + snapshot.blue_wins, 4);
        assert_eq!(snapshot.red, "random");
        assert_eq!(snapshot.blue, "alphabeta(d=2)");
        assert!(snapshot.min_plies >= 1 && snapshot.max_plies <= 16);
    }

    #[test]
    fn test_seeded_match_is_reproducible() {
        let mut config = base_config();
        config.red = "mcts".into();
        config.blue = "random".into();
        config.games = 3;

        let first = Arena::new(config.clone()).unwrap().run().unwrap();
        let second = Arena::new(config).unwrap().run().unwrap();
        assert_eq!(first.red_wins, second.red_wins);
        assert_eq!(first.min_plies, second.min_plies);
        assert_eq!(first.max_plies, second.max_plies);
    }

    #[test]
    fn test_match_writes_stats() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("arena_stats.json");
        let mut config = base_config();
        config.red = "random".into();
        config.blue = "random".into();
        config.stats_path = Some(path.to_string_lossy().into_owned());

        Arena::new(config).unwrap().run().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: MatchStatsSnapshot = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.games_completed, 2);
    }

    #[test]
    fn test_report_counts_calls() {
        let mut config = base_config();
        config.red = "alphabeta".into();
        config.blue = "random".into();

        let reports = Arena::new(config).unwrap().report().unwrap();
        assert_eq!(reports.len(), 2);

        let alphabeta = &reports[0];
        assert_eq!(alphabeta.strategy, "alphabeta(d=2)");
        assert!(alphabeta.counts.result > 0);
        assert!(alphabeta.counts.actions > 0);

        // Random play lists the moves once and never applies one.
        let random = &reports[1];
        assert_eq!(random.counts.actions, 1);
        assert_eq!(random.counts.result, 0);
    }

    #[test]
    fn test_report_deduplicates_identical_seats() {
        let mut config = base_config();
        config.red = "mcts".into();
        config.blue = "mcts".into();

        let reports = Arena::new(config).unwrap().report().unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].counts.result >= 50);
    }
}
