//! Shared scoring helpers for two-player game implementations.

/// Utility awarded for a decisive terminal position.
pub const WIN_UTILITY: i32 = 1_000_000;

/// Lower search bound. Symmetric with [`POS_INF`] so negation never overflows.
pub const NEG_INF: i32 = -i32::MAX;

/// Upper search bound.
pub const POS_INF: i32 = i32::MAX;

/// Normalize a terminal utility to a rollout reward.
///
/// # Example
/// ```
/// use engine_core::game_utils::terminal_reward;
///
/// assert_eq!(terminal_reward(1_000_000), 1.0);
/// assert_eq!(terminal_reward(-1_000_000), -1.0);
/// assert_eq!(terminal_reward(0), 0.0);
/// ```
#[inline]
pub fn terminal_reward(utility: i32) -> f32 {
    match utility.signum() {
        1 => 1.0,
        -1 => -1.0,
        _ => 0.0,
    }
}

/// Whether a search value is a proven win or loss rather than a heuristic guess.
#[inline]
pub fn is_decisive(value: i32) -> bool {
    value.abs() >= WIN_UTILITY
}
