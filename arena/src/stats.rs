//! Match statistics tracking and persistence.
//!
//! Counters are atomics so a single tracker can be shared by concurrent
//! games. A snapshot can be written to a JSON file for later inspection.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use games_hadron::Player;

/// Aggregated match statistics, designed for lock-free updates.
#[derive(Debug)]
pub struct MatchStats {
    /// Strategy name playing Red
    red: String,
    /// Strategy name playing Blue
    blue: String,
    /// Board size as "WxH"
    board: String,
    /// Number of games completed
    games_completed: AtomicU32,
    /// Games won by Red (the first mover)
    red_wins: AtomicU32,
    /// Games won by Blue
    blue_wins: AtomicU32,
    /// Total plies across all games
    total_plies: AtomicU64,
    /// Shortest game seen, in plies
    min_plies: AtomicU32,
    /// Longest game seen, in plies
    max_plies: AtomicU32,
    /// Total time spent inside games (microseconds)
    game_time_us: AtomicU64,
    /// Start time for rate calculations
    start_time: Instant,
}

/// Serializable stats for JSON output.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchStatsSnapshot {
    pub red: String,
    pub blue: String,
    pub board: String,
    pub games_completed: u32,
    pub red_wins: u32,
    pub blue_wins: u32,
    pub red_win_rate: f64,
    pub avg_plies: f64,
    pub min_plies: u32,
    pub max_plies: u32,
    pub avg_game_ms: f64,
    pub runtime_seconds: f64,
    pub timestamp: u64,
}

impl MatchStats {
    /// Create new stats tracker.
    pub fn new(red: &str, blue: &str, width: usize, height: usize) -> Self {
        Self {
            red: red.to_string(),
            blue: blue.to_string(),
            board: format!("{width}x{height}"),
            games_completed: AtomicU32::new(0),
            red_wins: AtomicU32::new(0),
            blue_wins: AtomicU32::new(0),
            total_plies: AtomicU64::new(0),
            min_plies: AtomicU32::new(u32::MAX),
            max_plies: AtomicU32::new(0),
            game_time_us: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a completed game.
    pub fn record_game(&self, winner: Option<Player>, plies: u32, elapsed: Duration) {
        self.games_completed.fetch_add(1, Ordering::Relaxed);
        self.total_plies.fetch_add(plies as u64, Ordering::Relaxed);
        self.min_plies.fetch_min(plies, Ordering::Relaxed);
        self.max_plies.fetch_max(plies, Ordering::Relaxed);
        self.game_time_us
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);

        match winner {
            Some(Player::Red) => {
                self.red_wins.fetch_add(1, Ordering::Relaxed);
            }
            Some(Player::Blue) => {
                self.blue_wins.fetch_add(1, Ordering::Relaxed);
            }
            // Only a game that starts terminal has no winner.
            None => {}
        }
    }

    /// Get a snapshot of current stats.
    pub fn snapshot(&self) -> MatchStatsSnapshot {
        let games = self.games_completed.load(Ordering::Relaxed);
        let red_wins = self.red_wins.load(Ordering::Relaxed);
        let total_plies = self.total_plies.load(Ordering::Relaxed);
        let game_time_us = self.game_time_us.load(Ordering::Relaxed);

        let (red_win_rate, avg_plies, avg_game_ms) = if games > 0 {
            (
                red_wins as f64 / games as f64,
                total_plies as f64 / games as f64,
                game_time_us as f64 / 1000.0 / games as f64,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        MatchStatsSnapshot {
            red: self.red.clone(),
            blue: self.blue.clone(),
            board: self.board.clone(),
            games_completed: games,
            red_wins,
            blue_wins: self.blue_wins.load(Ordering::Relaxed),
            red_win_rate,
            avg_plies,
            min_plies: if games > 0 {
                self.min_plies.load(Ordering::Relaxed)
            } else {
                0
            },
            max_plies: self.max_plies.load(Ordering::Relaxed),
            avg_game_ms,
            runtime_seconds: self.start_time.elapsed().as_secs_f64(),
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Write stats to a JSON file (atomic write-then-rename).
    pub fn write_stats(&self, path: &Path) {
        let snapshot = self.snapshot();

        // Serialize to JSON
        let json = match serde_json::to_string_pretty(&snapshot) {
            Ok(j) => j,
            Err(e) => {
                warn!("Failed to serialize match stats: {}", e);
                return;
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create stats directory: {}", e);
                return;
            }
        }

        // Write to temp file then rename (atomic on most filesystems)
        let mut temp_path = PathBuf::from(path);
        temp_path.set_extension("json.tmp");
        match fs::File::create(&temp_path) {
            Ok(mut file) => {
                if let Err(e) = file.write_all(json.as_bytes()) {
                    warn!("Failed to write match stats: {}", e);
                    return;
                }
            }
            Err(e) => {
                warn!("Failed to create temp stats file: {}", e);
                return;
            }
        }

        if let Err(e) = fs::rename(&temp_path, path) {
            warn!("Failed to rename stats file: {}", e);
            // Try to clean up temp file
            let _ = fs::remove_file(&temp_path);
            return;
        }

        debug!("Wrote match stats to {}", path.display());
    }
}
