//! Kickabout - scorekeeping core for a weekly six-a-side game
//!
//! This crate turns recorded match history into per-player ratings and
//! proposes balanced two-team splits for the next game, plus the team sheets,
//! player statistics and fund tallies shown alongside them.

pub mod config;
pub mod error;
pub mod funds;
pub mod history;
pub mod rating;
pub mod split;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Result, ScorekeeperError};
pub use types::*;

// Re-export key components
pub use history::MatchHistory;
pub use rating::{EloTeamCalculator, RatingCalculator, RatingEngine};
pub use split::{Roster, TeamSplit, TeamSplitter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
