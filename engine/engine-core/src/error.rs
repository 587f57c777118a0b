//! Error type shared by games, searches and the game driver.

use thiserror::Error;

/// Contract violations raised by the engine.
///
/// None of these are recoverable by retrying: they indicate a caller passed a
/// move, position or parameter the engine cannot work with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A move outside the legal set was applied.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// A search or player was asked to move from a position with no moves.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Board dimensions or search parameters are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::InvalidMove("(1, 2)".into());
        assert_eq!(err.to_string(), "invalid move: (1, 2)");

        let err = GameError::InvalidState("root is terminal".into());
        assert!(err.to_string().contains("root is terminal"));
    }
}
