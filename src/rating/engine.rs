//! Sequential replay of match history into per-player ratings
//!
//! Match days are applied strictly in ascending date order. Each day's team
//! means are taken from the ratings as they stood after the previous day, so
//! the final ratings depend on that order.

use crate::config::RatingSettings;
use crate::error::{Result, ScorekeeperError};
use crate::history::{LineupConflict, MatchDay, MatchHistory};
use crate::rating::calculator::{EloTeamCalculator, RatingCalculator};
use crate::types::{PlayerName, PlayerRatings, Team};
use crate::utils::mean;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Why a match day did not contribute to ratings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No rows at all for this side
    MissingTeam(Team),
    /// Only the placeholder was recorded for this side
    NoNamedPlayers(Team),
    /// A player is listed twice for the day
    InvalidLineup(LineupConflict),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingTeam(team) => write!(f, "team {} not recorded", team),
            SkipReason::NoNamedPlayers(team) => write!(f, "team {} has no named players", team),
            SkipReason::InvalidLineup(conflict) => write!(f, "{}", conflict),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedMatchDay {
    pub date: NaiveDate,
    pub reason: SkipReason,
}

/// Ratings plus a record of which match days were used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub ratings: PlayerRatings,
    /// Number of match days that updated ratings
    pub applied: usize,
    pub skipped: Vec<SkippedMatchDay>,
}

/// Replays match history through a [`RatingCalculator`]
#[derive(Debug, Clone)]
pub struct RatingEngine<C = EloTeamCalculator> {
    calculator: C,
}

impl RatingEngine<EloTeamCalculator> {
    pub fn new(settings: RatingSettings) -> Self {
        Self::with_calculator(EloTeamCalculator::new(settings))
    }
}

impl Default for RatingEngine<EloTeamCalculator> {
    fn default() -> Self {
        Self::new(RatingSettings::default())
    }
}

impl<C: RatingCalculator> RatingEngine<C> {
    pub fn with_calculator(calculator: C) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    /// Ratings for every named player in `history`
    pub fn replay(&self, history: &MatchHistory) -> Result<PlayerRatings> {
        Ok(self.replay_with_report(history)?.ratings)
    }

    /// Like [`replay`](Self::replay), also reporting skipped match days
    pub fn replay_with_report(&self, history: &MatchHistory) -> Result<ReplayReport> {
        let initial = self.calculator.initial_rating();
        let mut ratings: HashMap<PlayerName, f64> = history
            .player_names()
            .into_iter()
            .map(|name| (name, initial))
            .collect();

        let mut applied = 0;
        let mut skipped = Vec::new();

        for day in history.match_days() {
            match self.apply_match_day(&mut ratings, &day)? {
                Ok(()) => applied += 1,
                Err(reason) => {
                    warn!("Skipping match day {} for ratings: {}", day.date, reason);
                    skipped.push(SkippedMatchDay {
                        date: day.date,
                        reason,
                    });
                }
            }
        }

        info!(
            "Replayed {} match days for {} players ({} skipped)",
            applied,
            ratings.len(),
            skipped.len()
        );

        Ok(ReplayReport {
            ratings: PlayerRatings::from_map(ratings),
            applied,
            skipped,
        })
    }

    /// Apply one day's update; the inner `Err` marks a day that cannot be rated
    fn apply_match_day(
        &self,
        ratings: &mut HashMap<PlayerName, f64>,
        day: &MatchDay<'_>,
    ) -> Result<std::result::Result<(), SkipReason>> {
        let Some(outcome) = day.outcome() else {
            let missing = if day.has_team(Team::A) {
                Team::B
            } else {
                Team::A
            };
            return Ok(Err(SkipReason::MissingTeam(missing)));
        };
        if let Some(conflict) = day.lineup_conflict() {
            return Ok(Err(SkipReason::InvalidLineup(conflict)));
        }

        let team_a: Vec<&str> = day.players(Team::A).collect();
        let team_b: Vec<&str> = day.players(Team::B).collect();

        let team_mean = |players: &[&str]| {
            let values: Vec<f64> = players
                .iter()
                .filter_map(|name| ratings.get(*name).copied())
                .collect();
            mean(&values)
        };
        let (Some(mean_a), Some(mean_b)) = (team_mean(&team_a), team_mean(&team_b)) else {
            let empty = if team_a.is_empty() { Team::A } else { Team::B };
            return Ok(Err(SkipReason::NoNamedPlayers(empty)));
        };

        let delta =
            self.calculator
                .team_rating_change(mean_a, mean_b, outcome.signed_for(Team::A));
        if !delta.is_finite() {
            return Err(ScorekeeperError::RatingCalculationFailed {
                reason: format!("Non-finite rating change on {}", day.date),
            }
            .into());
        }

        debug!(
            "{}: {}-{}, team means {:.2} vs {:.2}, delta {:+.4}",
            day.date, outcome.goals_a, outcome.goals_b, mean_a, mean_b, delta
        );

        for (players, signed) in [(&team_a, delta), (&team_b, -delta)] {
            for name in players.iter() {
                if let Some(rating) = ratings.get_mut(*name) {
                    *rating += signed;
                }
            }
        }

        Ok(Ok(()))
    }
}
