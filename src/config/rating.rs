//! Rating system configuration

use serde::{Deserialize, Serialize};

/// Parameters of the team Elo replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// Rating every player starts from
    pub initial_rating: f64,
    /// Elo step size
    pub k_factor: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            initial_rating: 1500.0,
            k_factor: 32.0,
        }
    }
}
