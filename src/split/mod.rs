//! Balanced team splitting
//!
//! Given a validated roster and the current ratings, finds the ways of
//! dividing the players into two equal teams whose mean ratings are closest.

pub mod roster;
pub mod splitter;

// Re-export commonly used types
pub use roster::{parse_roster, Roster, ROSTER_SIZE, TEAM_SIZE};
pub use splitter::{TeamSplit, TeamSplitter};
