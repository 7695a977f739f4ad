//! Test fixtures: a small season of recorded matches and helper builders

#![allow(dead_code)]

use chrono::NaiveDate;
use kickabout::types::{MatchRecord, PlayerRatings, Team};
use kickabout::MatchHistory;
use std::collections::HashMap;

/// The twelve regulars used throughout the season fixture
pub const REGULARS: [&str; 12] = [
    "Aleks", "Bobi", "Dimo", "Georgi", "Hristo", "Ivan", "Kiro", "Mitko", "Niki", "Petar",
    "Stefan", "Vasko",
];

pub fn thursday(week: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 4).unwrap() + chrono::Duration::weeks(week as i64)
}

/// Rows for one match: named players with their goals plus unattributed goals per side
pub fn match_rows(
    date: NaiveDate,
    team_a: &[(&str, u32)],
    other_a: u32,
    team_b: &[(&str, u32)],
    other_b: u32,
) -> Vec<MatchRecord> {
    let mut rows = Vec::new();
    for (team, players, other) in [(Team::A, team_a, other_a), (Team::B, team_b, other_b)] {
        for (name, goals) in players {
            rows.push(MatchRecord::new(date, team, *name, *goals));
        }
        rows.push(MatchRecord::new(date, team, "Other", other));
    }
    rows
}

/// Four weeks of six-a-side between the regulars, rows deliberately unordered
pub fn season() -> MatchHistory {
    let r = &REGULARS;
    let mut rows = Vec::new();
    // week 2 first: input order must not matter
    rows.extend(match_rows(
        thursday(2),
        &[(r[0], 1), (r[2], 0), (r[4], 2), (r[6], 0), (r[8], 0), (r[10], 1)],
        0,
        &[(r[1], 3), (r[3], 1), (r[5], 0), (r[7], 0), (r[9], 1), (r[11], 0)],
        1,
    ));
    rows.extend(match_rows(
        thursday(0),
        &[(r[0], 2), (r[1], 1), (r[2], 0), (r[3], 0), (r[4], 1), (r[5], 3)],
        0,
        &[(r[6], 1), (r[7], 0), (r[8], 2), (r[9], 0), (r[10], 0), (r[11], 1)],
        0,
    ));
    rows.extend(match_rows(
        thursday(1),
        &[(r[0], 0), (r[1], 1), (r[6], 2), (r[7], 0), (r[8], 0), (r[9], 1)],
        1,
        &[(r[2], 2), (r[3], 0), (r[4], 1), (r[5], 1), (r[10], 0), (r[11], 0)],
        0,
    ));
    rows.extend(match_rows(
        thursday(3),
        &[(r[0], 1), (r[3], 1), (r[5], 1), (r[6], 0), (r[9], 0), (r[11], 2)],
        0,
        &[(r[1], 0), (r[2], 1), (r[4], 1), (r[7], 1), (r[8], 0), (r[10], 2)],
        0,
    ));
    MatchHistory::new(rows)
}

pub fn regulars() -> Vec<String> {
    REGULARS.iter().map(|name| name.to_string()).collect()
}

pub fn uniform_ratings(names: &[String], rating: f64) -> PlayerRatings {
    PlayerRatings::from_map(
        names
            .iter()
            .map(|name| (name.clone(), rating))
            .collect::<HashMap<_, _>>(),
    )
}
