//! Team sheets: who played for each side on a date and who scored

use crate::error::{Result, ScorekeeperError};
use crate::history::{find_lineup_conflict, MatchHistory};
use crate::types::{is_placeholder, MatchRecord, PlayerName, Team, PLACEHOLDER_PLAYER};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetEntry {
    pub name: PlayerName,
    pub goals: u32,
}

/// One side of a match, top scorers first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSheet {
    pub team: Team,
    pub entries: Vec<SheetEntry>,
    pub total_goals: u32,
}

impl TeamSheet {
    fn empty(team: Team) -> Self {
        Self {
            team,
            entries: Vec::new(),
            total_goals: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSheet {
    pub date: NaiveDate,
    pub team_a: TeamSheet,
    pub team_b: TeamSheet,
}

impl MatchSheet {
    pub fn is_empty(&self) -> bool {
        self.team_a.entries.is_empty() && self.team_b.entries.is_empty()
    }
}

impl MatchHistory {
    /// Team sheet for a date; both sides are empty when nothing was recorded
    pub fn team_sheet(&self, date: NaiveDate) -> MatchSheet {
        let day = self.match_day(date);
        let side = |team: Team| {
            let mut sheet = TeamSheet::empty(team);
            for row in day.team_rows(team) {
                sheet.total_goals += row.goals;
                sheet.entries.push(SheetEntry {
                    name: row.name.clone(),
                    goals: row.goals,
                });
            }
            // stable: equal scorers keep recorded order
            sheet.entries.sort_by(|a, b| b.goals.cmp(&a.goals));
            sheet
        };

        MatchSheet {
            date,
            team_a: side(Team::A),
            team_b: side(Team::B),
        }
    }
}

/// Rows for one side of a match being entered
///
/// Goals in `total_goals` not credited to a named player go to the placeholder
/// row, which is always appended. Blank names and placeholder rows in
/// `players` are ignored; a name listed twice is an `InvalidMatchEntry`.
pub fn build_team_entry(
    date: NaiveDate,
    team: Team,
    players: &[(PlayerName, u32)],
    total_goals: u32,
) -> Result<Vec<MatchRecord>> {
    let mut rows: Vec<MatchRecord> = players
        .iter()
        .filter(|(name, _)| !name.trim().is_empty() && !is_placeholder(name.trim()))
        .map(|(name, goals)| MatchRecord::new(date, team, name.trim(), *goals))
        .collect();
    if let Some(conflict) = find_lineup_conflict(&rows) {
        return Err(ScorekeeperError::InvalidMatchEntry {
            reason: conflict.to_string(),
        }
        .into());
    }

    let credited: u32 = rows.iter().map(|row| row.goals).sum();
    let unattributed = total_goals.checked_sub(credited).ok_or_else(|| {
        ScorekeeperError::InvalidMatchEntry {
            reason: format!(
                "Team {} total goals {} is less than the {} credited to players",
                team, total_goals, credited
            ),
        }
    })?;

    rows.push(MatchRecord::new(date, team, PLACEHOLDER_PLAYER, unattributed));
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    #[test]
    fn test_team_sheet_sorted_by_goals() {
        let history = MatchHistory::new(vec![
            MatchRecord::new(date(), Team::A, "Ivan", 1),
            MatchRecord::new(date(), Team::A, "Petar", 3),
            MatchRecord::new(date(), Team::A, "Other", 1),
            MatchRecord::new(date(), Team::B, "Georgi", 2),
        ]);

        let sheet = history.team_sheet(date());
        let names: Vec<_> = sheet.team_a.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Petar", "Ivan", "Other"]);
        assert_eq!(sheet.team_a.total_goals, 5);
        assert_eq!(sheet.team_b.total_goals, 2);
    }

    #[test]
    fn test_unknown_date_gives_empty_sheet() {
        let history = MatchHistory::default();
        let sheet = history.team_sheet(date());
        assert!(sheet.is_empty());
        assert_eq!(sheet.team_a.total_goals, 0);
    }

    #[test]
    fn test_build_team_entry_adds_placeholder() {
        let rows = build_team_entry(
            date(),
            Team::B,
            &[
                ("Georgi".to_string(), 2),
                ("".to_string(), 0),
                ("Other".to_string(), 5),
                ("Dimo".to_string(), 1),
            ],
            6,
        )
        .unwrap();

        assert_eq!(rows.len(), 3);
        let other = rows.last().unwrap();
        assert_eq!(other.name, "Other");
        assert_eq!(other.goals, 3);
        assert!(rows.iter().all(|row| row.team == Team::B && row.date == date()));
    }

    #[test]
    fn test_build_team_entry_rejects_repeated_player() {
        let err = build_team_entry(
            date(),
            Team::B,
            &[("Georgi".to_string(), 1), (" Georgi ".to_string(), 0)],
            2,
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ScorekeeperError>(),
            Some(&ScorekeeperError::InvalidMatchEntry {
                reason: "Team B contains duplicate player Georgi".to_string()
            })
        );
    }

    #[test]
    fn test_build_team_entry_rejects_overcredited_goals() {
        let err = build_team_entry(date(), Team::A, &[("Ivan".to_string(), 4)], 3).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScorekeeperError>(),
            Some(ScorekeeperError::InvalidMatchEntry { .. })
        ));
    }
}
