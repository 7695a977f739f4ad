//! Utility functions for the scorekeeping core

use anyhow::anyhow;
use chrono::NaiveDate;

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Calculate the absolute difference between two ratings
pub fn rating_difference(rating1: f64, rating2: f64) -> f64 {
    (rating1 - rating2).abs()
}

/// Parse a match date in `YYYY-MM-DD` form
pub fn parse_date(value: &str) -> crate::error::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow!("Invalid date '{}': {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1500.0]), Some(1500.0));
        assert_eq!(mean(&[1400.0, 1600.0, 1500.0]), Some(1500.0));
    }

    #[test]
    fn test_rating_difference() {
        assert_eq!(rating_difference(1500.0, 1400.0), 100.0);
        assert_eq!(rating_difference(1400.0, 1500.0), 100.0);
        assert_eq!(rating_difference(1500.0, 1500.0), 0.0);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-04").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 4).unwrap()
        );
        assert!(parse_date("04.01.2024").is_err());
    }
}
