//! Rating calculator trait and the team Elo implementation
//!
//! A calculator turns the pre-match mean ratings of both sides plus the
//! signed match outcome into a single team-level rating change.

use crate::config::RatingSettings;
use serde::{Deserialize, Serialize};
use skillratings::elo::{expected_score, EloRating};

/// Trait for calculating team-level rating changes after a match
pub trait RatingCalculator: Send + Sync {
    /// Rating change for team A; team B receives the negation
    ///
    /// # Arguments
    /// * `team_a_mean` - Mean rating of team A before the match
    /// * `team_b_mean` - Mean rating of team B before the match
    /// * `outcome_a` - Signed outcome for team A (positive win, zero draw, negative loss)
    fn team_rating_change(&self, team_a_mean: f64, team_b_mean: f64, outcome_a: i32) -> f64;

    /// Get the initial rating for new players
    fn initial_rating(&self) -> f64;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// Classic Elo step applied to whole teams
///
/// The observed score is the logistic transform of the signed outcome, so a
/// win counts as `sigmoid(1)` rather than a full point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EloTeamCalculator {
    settings: RatingSettings,
}

impl EloTeamCalculator {
    pub fn new(settings: RatingSettings) -> Self {
        Self { settings }
    }

    /// Logistic transform of a signed outcome into (0, 1)
    pub fn normalized_outcome(outcome: i32) -> f64 {
        1.0 / (1.0 + (-f64::from(outcome)).exp())
    }

    /// Expected score of a side rated `own` against a side rated `other`
    pub fn expected(own: f64, other: f64) -> f64 {
        let (expected_own, _) =
            expected_score(&EloRating { rating: own }, &EloRating { rating: other });
        expected_own
    }
}

impl Default for EloTeamCalculator {
    fn default() -> Self {
        Self::new(RatingSettings::default())
    }
}

impl RatingCalculator for EloTeamCalculator {
    fn team_rating_change(&self, team_a_mean: f64, team_b_mean: f64, outcome_a: i32) -> f64 {
        let normalized = Self::normalized_outcome(outcome_a);
        let expected = Self::expected(team_a_mean, team_b_mean);
        self.settings.k_factor * (normalized - expected)
    }

    fn initial_rating(&self) -> f64 {
        self.settings.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "team_elo",
            "initial_rating": self.settings.initial_rating,
            "k_factor": self.settings.k_factor
        })
    }
}
