//! Per-player statistics derived from match history

use crate::history::MatchHistory;
use crate::types::{MatchResult, PlayerName};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Win/draw/loss record for a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: PlayerName,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl PlayerRecord {
    fn new(name: PlayerName) -> Self {
        Self {
            name,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    /// Fraction of matches won, 0.0 with no matches
    pub fn win_rate(&self) -> f64 {
        match self.played() {
            0 => 0.0,
            played => self.wins as f64 / played as f64,
        }
    }
}

/// Matches played and goals scored by a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearances {
    pub name: PlayerName,
    pub matches: u32,
    pub goals: u32,
}

impl MatchHistory {
    /// Win/draw/loss records for every named player
    ///
    /// Dates where one side is missing count for nobody. Sorted by wins, then
    /// draws, both descending.
    pub fn player_records(&self) -> Vec<PlayerRecord> {
        let mut records: HashMap<&str, PlayerRecord> = HashMap::new();

        for day in self.match_days() {
            let Some(outcome) = day.outcome() else {
                continue;
            };
            for row in day.rows.iter().copied().filter(|row| !row.is_placeholder()) {
                let record = records
                    .entry(row.name.as_str())
                    .or_insert_with(|| PlayerRecord::new(row.name.clone()));
                match outcome.result_for(row.team) {
                    MatchResult::Win => record.wins += 1,
                    MatchResult::Draw => record.draws += 1,
                    MatchResult::Loss => record.losses += 1,
                }
            }
        }

        let mut records: Vec<_> = records.into_values().collect();
        records.sort_by(|a, b| {
            b.wins
                .cmp(&a.wins)
                .then_with(|| b.draws.cmp(&a.draws))
                .then_with(|| a.name.cmp(&b.name))
        });
        records
    }

    /// Appearances and goals per named player on or after `since`
    ///
    /// Sorted by matches, then goals, both descending.
    pub fn appearances(&self, since: Option<NaiveDate>) -> Vec<Appearances> {
        let mut totals: HashMap<&str, Appearances> = HashMap::new();

        for row in self.records().iter().filter(|row| {
            !row.is_placeholder() && since.map_or(true, |start| row.date >= start)
        }) {
            let entry = totals.entry(row.name.as_str()).or_insert_with(|| Appearances {
                name: row.name.clone(),
                matches: 0,
                goals: 0,
            });
            entry.matches += 1;
            entry.goals += row.goals;
        }

        let mut totals: Vec<_> = totals.into_values().collect();
        totals.sort_by(|a, b| {
            b.matches
                .cmp(&a.matches)
                .then_with(|| b.goals.cmp(&a.goals))
                .then_with(|| a.name.cmp(&b.name))
        });
        totals
    }
}
