//! Player ratings from match history
//!
//! This module provides the team Elo calculator and the engine that replays
//! match days in date order to produce a rating per player.

pub mod calculator;
pub mod engine;

// Re-export commonly used types
pub use calculator::{EloTeamCalculator, RatingCalculator};
pub use engine::{RatingEngine, ReplayReport, SkipReason, SkippedMatchDay};
