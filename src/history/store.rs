//! In-memory match history and chronological grouping
//!
//! Rows arrive in whatever order the data store hands them out. Everything
//! downstream works on [`MatchDay`] groups, which are always produced in
//! ascending date order.

use crate::error::{Result, ScorekeeperError};
use crate::types::{MatchOutcome, MatchRecord, PlayerName, Team};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, warn};

/// A named player listed more than once for one match date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineupConflict {
    /// Listed twice for the same side
    RepeatedOnTeam { team: Team, name: PlayerName },
    /// Listed for both sides
    OnBothTeams { name: PlayerName },
}

impl std::fmt::Display for LineupConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineupConflict::RepeatedOnTeam { team, name } => {
                write!(f, "Team {} contains duplicate player {}", team, name)
            }
            LineupConflict::OnBothTeams { name } => {
                write!(f, "{} appears for both teams", name)
            }
        }
    }
}

/// First lineup conflict among the rows of one match date
///
/// Repeats within team A are reported before team B, then players on both
/// sides. The placeholder may appear any number of times.
pub fn find_lineup_conflict<'r>(
    rows: impl IntoIterator<Item = &'r MatchRecord>,
) -> Option<LineupConflict> {
    let mut sides: [(Team, BTreeSet<&str>); 2] =
        [(Team::A, BTreeSet::new()), (Team::B, BTreeSet::new())];
    let mut repeated: [Option<&str>; 2] = [None, None];

    for row in rows.into_iter().filter(|row| !row.is_placeholder()) {
        let slot = match row.team {
            Team::A => 0,
            Team::B => 1,
        };
        if !sides[slot].1.insert(row.name.as_str()) && repeated[slot].is_none() {
            repeated[slot] = Some(row.name.as_str());
        }
    }

    for ((team, _), name) in sides.iter().zip(repeated) {
        if let Some(name) = name {
            return Some(LineupConflict::RepeatedOnTeam {
                team: *team,
                name: name.to_string(),
            });
        }
    }

    sides[0]
        .1
        .intersection(&sides[1].1)
        .next()
        .map(|name| LineupConflict::OnBothTeams {
            name: name.to_string(),
        })
}

/// All rows recorded for a single match date
#[derive(Debug, Clone)]
pub struct MatchDay<'a> {
    pub date: NaiveDate,
    pub rows: Vec<&'a MatchRecord>,
}

impl<'a> MatchDay<'a> {
    /// Rows for one side, placeholder included
    pub fn team_rows(&self, team: Team) -> impl Iterator<Item = &'a MatchRecord> + '_ {
        self.rows.iter().copied().filter(move |row| row.team == team)
    }

    /// Named players on one side
    pub fn players(&self, team: Team) -> impl Iterator<Item = &'a str> + '_ {
        self.team_rows(team)
            .filter(|row| !row.is_placeholder())
            .map(|row| row.name.as_str())
    }

    /// Total goals for one side, unattributed goals included
    pub fn goals(&self, team: Team) -> u32 {
        self.team_rows(team).map(|row| row.goals).sum()
    }

    pub fn has_team(&self, team: Team) -> bool {
        self.team_rows(team).next().is_some()
    }

    pub fn lineup_conflict(&self) -> Option<LineupConflict> {
        find_lineup_conflict(self.rows.iter().copied())
    }

    /// Final score, or `None` when a side has no rows at all
    pub fn outcome(&self) -> Option<MatchOutcome> {
        if !self.has_team(Team::A) || !self.has_team(Team::B) {
            return None;
        }
        Some(MatchOutcome {
            date: self.date,
            goals_a: self.goals(Team::A),
            goals_b: self.goals(Team::B),
        })
    }
}

/// Ordered collection of match rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchHistory {
    records: Vec<MatchRecord>,
}

impl MatchHistory {
    /// Build a history, dropping rows without a player name
    pub fn new(records: Vec<MatchRecord>) -> Self {
        let total = records.len();
        let records: Vec<_> = records
            .into_iter()
            .map(|mut record| {
                record.name = record.name.trim().to_string();
                record
            })
            .filter(|record| !record.name.is_empty())
            .collect();

        if records.len() < total {
            warn!(
                "Dropped {} match rows without a player name",
                total - records.len()
            );
        }

        Self { records }
    }

    /// Parse a JSON array of rows with `date`, `team`, `name` and `goals` fields
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let records: Vec<MatchRecord> =
            serde_json::from_str(raw).context("Failed to parse match history")?;
        Ok(Self::new(records))
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read match history {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct named players, placeholder excluded
    pub fn player_names(&self) -> BTreeSet<PlayerName> {
        self.records
            .iter()
            .filter(|record| !record.is_placeholder())
            .map(|record| record.name.clone())
            .collect()
    }

    /// Distinct match dates, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records
            .iter()
            .map(|record| record.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Rows grouped per date, ascending by date
    ///
    /// Within a day, rows keep the order they were recorded in.
    pub fn match_days(&self) -> Vec<MatchDay<'_>> {
        let mut by_date: BTreeMap<NaiveDate, Vec<&MatchRecord>> = BTreeMap::new();
        for record in &self.records {
            by_date.entry(record.date).or_default().push(record);
        }

        by_date
            .into_iter()
            .map(|(date, rows)| MatchDay { date, rows })
            .collect()
    }

    /// Rows for a single date
    pub fn match_day(&self, date: NaiveDate) -> MatchDay<'_> {
        MatchDay {
            date,
            rows: self
                .records
                .iter()
                .filter(|record| record.date == date)
                .collect(),
        }
    }

    /// Final scores for every date where both sides were recorded
    pub fn outcomes(&self) -> Vec<MatchOutcome> {
        self.match_days()
            .iter()
            .filter_map(|day| day.outcome())
            .collect()
    }

    /// Replace every row of one match date with `rows`
    ///
    /// All rows must share a date and no named player may be listed twice,
    /// for the same side or for both. History stays sorted by date, newest
    /// first.
    pub fn record_match(&mut self, rows: Vec<MatchRecord>) -> Result<()> {
        let rows = Self::new(rows).records;
        let dates: BTreeSet<NaiveDate> = rows.iter().map(|row| row.date).collect();
        if dates.len() > 1 {
            return Err(ScorekeeperError::InvalidMatchEntry {
                reason: format!("Rows span {} different dates", dates.len()),
            }
            .into());
        }
        let Some(&date) = dates.first() else {
            return Err(ScorekeeperError::InvalidMatchEntry {
                reason: "No rows to record".to_string(),
            }
            .into());
        };
        if let Some(conflict) = find_lineup_conflict(&rows) {
            return Err(ScorekeeperError::InvalidMatchEntry {
                reason: conflict.to_string(),
            }
            .into());
        }

        let before = self.records.len();
        self.records.retain(|record| record.date != date);
        debug!(
            "Replacing {} rows for {} with {} new rows",
            before - self.records.len(),
            date,
            rows.len()
        );

        self.records.extend(rows);
        self.records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(())
    }
}
