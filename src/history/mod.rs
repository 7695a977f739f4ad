//! Match history: the rows recorded per match date and the views derived from them
//!
//! This module owns the chronological grouping every other component relies
//! on, plus the team sheet and per-player statistics used by the dashboard.

pub mod sheet;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use sheet::{build_team_entry, MatchSheet, SheetEntry, TeamSheet};
pub use stats::{Appearances, PlayerRecord};
pub use store::{find_lineup_conflict, LineupConflict, MatchDay, MatchHistory};
