//! Error types for the scorekeeping core
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application. Domain conditions are raised as
//! [`ScorekeeperError`] and can be recovered with `anyhow::Error::downcast_ref`.

use std::collections::BTreeSet;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific scorekeeping scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScorekeeperError {
    #[error("Players not found in rating data: {}", join_names(names))]
    MissingPlayers { names: BTreeSet<String> },

    #[error("Invalid roster size: expected {expected} players, got {actual}")]
    InvalidRosterSize { expected: usize, actual: usize },

    #[error("Duplicate players in roster: {}", join_names(names))]
    DuplicatePlayers { names: BTreeSet<String> },

    #[error("Invalid team label: {label} (expected A or B)")]
    InvalidTeamLabel { label: String },

    #[error("Invalid match entry: {reason}")]
    InvalidMatchEntry { reason: String },

    #[error("Rating calculation failed: {reason}")]
    RatingCalculationFailed { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

fn join_names(names: &BTreeSet<String>) -> String {
    names.iter().cloned().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_players_message_lists_names() {
        let err = ScorekeeperError::MissingPlayers {
            names: ["Zed".to_string(), "Ana".to_string()].into_iter().collect(),
        };
        assert_eq!(
            err.to_string(),
            "Players not found in rating data: Ana, Zed"
        );
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = ScorekeeperError::InvalidRosterSize {
            expected: 12,
            actual: 11,
        }
        .into();

        match err.downcast_ref::<ScorekeeperError>() {
            Some(ScorekeeperError::InvalidRosterSize { expected, actual }) => {
                assert_eq!(*expected, 12);
                assert_eq!(*actual, 11);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
