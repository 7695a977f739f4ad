//! Common types used throughout the scorekeeping core

use crate::error::ScorekeeperError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

/// Player identifier as it appears on the team sheet
pub type PlayerName = String;

/// Reserved name absorbing goals not attributed to a named player
pub const PLACEHOLDER_PLAYER: &str = "Other";

/// Check whether a name is the unattributed-goals placeholder
pub fn is_placeholder(name: &str) -> bool {
    name == PLACEHOLDER_PLAYER
}

/// One of the two sides in a match
///
/// Deserializes through [`FromStr`], so stored labels get the same leniency
/// and the same `InvalidTeamLabel` error as typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::A => write!(f, "A"),
            Team::B => write!(f, "B"),
        }
    }
}

impl FromStr for Team {
    type Err = ScorekeeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Team::A),
            "B" | "b" => Ok(Team::B),
            other => Err(ScorekeeperError::InvalidTeamLabel {
                label: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Team {
    type Error = ScorekeeperError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

/// Result of a match from one team's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

/// One row of match history: a player's appearance for a team on a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub team: Team,
    pub name: PlayerName,
    #[serde(default)]
    pub goals: u32,
}

impl MatchRecord {
    pub fn new(date: NaiveDate, team: Team, name: impl Into<String>, goals: u32) -> Self {
        Self {
            date,
            team,
            name: name.into(),
            goals,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        is_placeholder(&self.name)
    }
}

/// Final score of a match date, placeholder goals included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub date: NaiveDate,
    pub goals_a: u32,
    pub goals_b: u32,
}

impl MatchOutcome {
    pub fn goals_for(&self, team: Team) -> u32 {
        match team {
            Team::A => self.goals_a,
            Team::B => self.goals_b,
        }
    }

    /// Signed outcome for `team`: 1 win, 0 draw, -1 loss
    pub fn signed_for(&self, team: Team) -> i32 {
        let own = self.goals_for(team);
        let other = self.goals_for(team.opponent());
        match own.cmp(&other) {
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Less => -1,
        }
    }

    pub fn result_for(&self, team: Team) -> MatchResult {
        match self.signed_for(team) {
            1 => MatchResult::Win,
            0 => MatchResult::Draw,
            _ => MatchResult::Loss,
        }
    }
}

/// Rating for a single player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    pub name: PlayerName,
    pub rating: f64,
}

/// Immutable snapshot of player ratings
///
/// Iteration order is ascending by rating, ties broken by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PlayerRating>", into = "Vec<PlayerRating>")]
pub struct PlayerRatings {
    entries: Vec<PlayerRating>,
    index: HashMap<PlayerName, usize>,
}

impl PlayerRatings {
    pub fn from_map(ratings: HashMap<PlayerName, f64>) -> Self {
        ratings
            .into_iter()
            .map(|(name, rating)| PlayerRating { name, rating })
            .collect::<Vec<_>>()
            .into()
    }

    /// Look up a player's rating
    pub fn get(&self, name: &str) -> Option<f64> {
        self.index.get(name).map(|&i| self.entries[i].rating)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Ratings in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &PlayerRating> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_map(&self) -> BTreeMap<PlayerName, f64> {
        self.entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.rating))
            .collect()
    }
}

impl From<Vec<PlayerRating>> for PlayerRatings {
    fn from(mut entries: Vec<PlayerRating>) -> Self {
        entries.sort_by(|a, b| {
            a.rating
                .total_cmp(&b.rating)
                .then_with(|| a.name.cmp(&b.name))
        });
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.name.clone(), i))
            .collect();
        Self { entries, index }
    }
}

impl From<PlayerRatings> for Vec<PlayerRating> {
    fn from(ratings: PlayerRatings) -> Self {
        ratings.entries
    }
}
