//! Exhaustive search for the fairest two-team split
//!
//! A split is a bitmask over roster positions, bit `i` set meaning roster
//! player `i` plays for team A. With twelve players there are 924 masks with
//! six bits set; a mask and its complement describe the same pair of teams.
//! The search is brute force and only viable because the roster size is fixed.

use crate::config::SplitSettings;
use crate::error::{Result, ScorekeeperError};
use crate::split::roster::{Roster, ROSTER_SIZE, TEAM_SIZE};
use crate::types::{PlayerName, PlayerRatings};
use crate::utils::rating_difference;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// A proposed pair of teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSplit {
    /// Team A names, alphabetical
    pub team_a: Vec<PlayerName>,
    /// Team B names, alphabetical
    pub team_b: Vec<PlayerName>,
    pub team_a_mean: f64,
    pub team_b_mean: f64,
    /// Absolute difference of the team means; 0 is perfectly balanced
    pub fairness: f64,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    mask: u16,
    team_a_mean: f64,
    team_b_mean: f64,
    fairness: f64,
}

/// Finds the most balanced splits of a roster
#[derive(Debug, Clone, Default)]
pub struct TeamSplitter {
    settings: SplitSettings,
}

impl TeamSplitter {
    pub fn new(settings: SplitSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SplitSettings {
        &self.settings
    }

    /// [`split`](Self::split) with the configured number of proposals
    pub fn best_splits(&self, roster: &Roster, ratings: &PlayerRatings) -> Result<Vec<TeamSplit>> {
        self.split(roster, ratings, self.settings.top_k)
    }

    /// The `top_k` fairest splits, best first
    ///
    /// Fails with `MissingPlayers` naming every roster entry that has no
    /// rating. Equal scores keep enumeration order. With complement dedupe
    /// on, the first roster player is always on team A and at most 462
    /// splits exist; with it off every split also appears mirrored.
    pub fn split(
        &self,
        roster: &Roster,
        ratings: &PlayerRatings,
        top_k: usize,
    ) -> Result<Vec<TeamSplit>> {
        let player_ratings = resolve(roster, ratings)?;

        let mut candidates = self.enumerate(&player_ratings);
        let evaluated = candidates.len();
        candidates.sort_by(|a, b| a.fairness.total_cmp(&b.fairness));
        candidates.truncate(top_k);

        debug!(
            "Evaluated {} candidate splits, best fairness {:?}",
            evaluated,
            candidates.first().map(|c| c.fairness)
        );

        Ok(candidates
            .into_iter()
            .map(|candidate| to_team_split(roster, candidate))
            .collect())
    }

    fn enumerate(&self, player_ratings: &[f64; ROSTER_SIZE]) -> Vec<Candidate> {
        (0u16..(1 << ROSTER_SIZE))
            .filter(|mask| mask.count_ones() as usize == TEAM_SIZE)
            .filter(|mask| !self.settings.dedupe_complements || mask & 1 == 1)
            .map(|mask| {
                let (mut sum_a, mut sum_b) = (0.0, 0.0);
                for (i, rating) in player_ratings.iter().enumerate() {
                    if mask & (1 << i) != 0 {
                        sum_a += rating;
                    } else {
                        sum_b += rating;
                    }
                }
                let team_a_mean = sum_a / TEAM_SIZE as f64;
                let team_b_mean = sum_b / TEAM_SIZE as f64;
                Candidate {
                    mask,
                    team_a_mean,
                    team_b_mean,
                    fairness: rating_difference(team_a_mean, team_b_mean),
                }
            })
            .collect()
    }
}

fn resolve(roster: &Roster, ratings: &PlayerRatings) -> Result<[f64; ROSTER_SIZE]> {
    let missing: BTreeSet<PlayerName> = roster
        .names()
        .iter()
        .filter(|name| !ratings.contains(name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(ScorekeeperError::MissingPlayers { names: missing }.into());
    }

    let mut resolved = [0.0; ROSTER_SIZE];
    for (slot, name) in resolved.iter_mut().zip(roster.names()) {
        *slot = ratings.get(name).unwrap_or_default();
    }
    Ok(resolved)
}

fn to_team_split(roster: &Roster, candidate: Candidate) -> TeamSplit {
    let (mut team_a, mut team_b): (Vec<_>, Vec<_>) = roster
        .names()
        .iter()
        .enumerate()
        .partition(|(i, _)| candidate.mask & (1 << i) != 0);
    team_a.sort_by(|a, b| a.1.cmp(b.1));
    team_b.sort_by(|a, b| a.1.cmp(b.1));

    TeamSplit {
        team_a: team_a.into_iter().map(|(_, name)| name.clone()).collect(),
        team_b: team_b.into_iter().map(|(_, name)| name.clone()).collect(),
        team_a_mean: candidate.team_a_mean,
        team_b_mean: candidate.team_b_mean,
        fairness: candidate.fairness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn names() -> Vec<String> {
        (1..=12).map(|i| format!("P{:02}", i)).collect()
    }

    fn ratings_from(values: &[f64]) -> PlayerRatings {
        PlayerRatings::from_map(
            names()
                .into_iter()
                .zip(values.iter().copied())
                .collect::<HashMap<_, _>>(),
        )
    }

    fn roster() -> Roster {
        Roster::new(names()).unwrap()
    }

    #[test]
    fn test_equal_ratings_all_perfect() {
        let ratings = ratings_from(&[1500.0; 12]);
        let splits = TeamSplitter::default()
            .split(&roster(), &ratings, 5)
            .unwrap();

        assert_eq!(splits.len(), 5);
        assert!(splits.iter().all(|s| s.fairness == 0.0));
    }

    #[test]
    fn test_finds_exact_balance() {
        // 1..=12 scaled: {1,2,3,10,11,12} vs {4..=9} both sum to 39
        let values: Vec<f64> = (1..=12).map(|i| 1400.0 + 10.0 * i as f64).collect();
        let ratings = ratings_from(&values);
        let splits = TeamSplitter::default()
            .split(&roster(), &ratings, 3)
            .unwrap();

        assert_eq!(splits.len(), 3);
        assert!(splits[0].fairness.abs() < 1e-9);
        assert!(splits.windows(2).all(|w| w[0].fairness <= w[1].fairness));
    }

    #[test]
    fn test_split_shape() {
        let values: Vec<f64> = (0..12).map(|i| 1450.0 + (i * i) as f64).collect();
        let splits = TeamSplitter::default()
            .split(&roster(), &ratings_from(&values), 10)
            .unwrap();

        for split in &splits {
            assert_eq!(split.team_a.len(), TEAM_SIZE);
            assert_eq!(split.team_b.len(), TEAM_SIZE);
            // first roster player pinned to team A when deduping
            assert!(split.team_a.contains(&"P01".to_string()));

            let mut sorted = split.team_a.clone();
            sorted.sort();
            assert_eq!(sorted, split.team_a);

            let union: BTreeSet<_> = split.team_a.iter().chain(&split.team_b).collect();
            assert_eq!(union.len(), ROSTER_SIZE);
            assert!(
                (split.fairness - (split.team_a_mean - split.team_b_mean).abs()).abs() < 1e-9
            );
        }
    }

    #[test]
    fn test_candidate_counts() {
        let ratings = ratings_from(&[1500.0; 12]);
        let deduped = TeamSplitter::default()
            .split(&roster(), &ratings, usize::MAX)
            .unwrap();
        assert_eq!(deduped.len(), 462);

        let mirrored = TeamSplitter::new(SplitSettings {
            top_k: 3,
            dedupe_complements: false,
        })
        .split(&roster(), &ratings, usize::MAX)
        .unwrap();
        assert_eq!(mirrored.len(), 924);
    }

    #[test]
    fn test_without_dedupe_best_split_appears_mirrored() {
        // powers of two make every partition's score unique
        let values: Vec<f64> = (0..12).map(|i| 1000.0 + f64::from(1u16 << i)).collect();
        let splitter = TeamSplitter::new(SplitSettings {
            top_k: 2,
            dedupe_complements: false,
        });
        let splits = splitter.best_splits(&roster(), &ratings_from(&values)).unwrap();

        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].fairness, splits[1].fairness);
        assert_eq!(splits[0].team_a, splits[1].team_b);
        assert_eq!(splits[0].team_b, splits[1].team_a);
    }

    #[test]
    fn test_missing_players_reported() {
        let mut values = HashMap::new();
        for name in names().into_iter().skip(2) {
            values.insert(name, 1500.0);
        }
        let ratings = PlayerRatings::from_map(values);

        let err = TeamSplitter::default()
            .split(&roster(), &ratings, 3)
            .unwrap_err();
        match err.downcast_ref::<ScorekeeperError>() {
            Some(ScorekeeperError::MissingPlayers { names }) => {
                let names: Vec<_> = names.iter().map(String::as_str).collect();
                assert_eq!(names, vec!["P01", "P02"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zero_top_k() {
        let splits = TeamSplitter::default()
            .split(&roster(), &ratings_from(&[1500.0; 12]), 0)
            .unwrap();
        assert!(splits.is_empty());
    }
}
