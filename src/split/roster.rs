//! Roster submissions

use crate::error::{Result, ScorekeeperError};
use crate::types::PlayerName;
use std::collections::{BTreeSet, HashSet};

/// Players per split request
pub const ROSTER_SIZE: usize = 12;

/// Players per team
pub const TEAM_SIZE: usize = ROSTER_SIZE / 2;

/// Names from a free-text submission, one per line
///
/// A leading `"<digits>. "` numbering is removed, surrounding whitespace is
/// trimmed and blank lines are dropped.
pub fn parse_roster(text: &str) -> Vec<PlayerName> {
    text.lines()
        .map(|line| strip_numbering(line.trim()).trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_numbering(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return line;
    }
    match line[digits..].strip_prefix('.') {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest,
        _ => line,
    }
}

/// Exactly [`ROSTER_SIZE`] distinct player names, in submission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: Vec<PlayerName>,
}

impl Roster {
    /// Validate a list of names
    ///
    /// Fails with `DuplicatePlayers` if a name repeats, otherwise with
    /// `InvalidRosterSize` unless there are exactly [`ROSTER_SIZE`] names.
    pub fn new(names: Vec<PlayerName>) -> Result<Self> {
        let mut seen = HashSet::new();
        let duplicates: BTreeSet<PlayerName> = names
            .iter()
            .filter(|name| !seen.insert(name.as_str()))
            .cloned()
            .collect();
        if !duplicates.is_empty() {
            return Err(ScorekeeperError::DuplicatePlayers { names: duplicates }.into());
        }

        if names.len() != ROSTER_SIZE {
            return Err(ScorekeeperError::InvalidRosterSize {
                expected: ROSTER_SIZE,
                actual: names.len(),
            }
            .into());
        }

        Ok(Self { names })
    }

    /// Parse and validate a free-text submission
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(parse_roster(text))
    }

    pub fn names(&self) -> &[PlayerName] {
        &self.names
    }
}
