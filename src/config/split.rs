//! Team split configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitSettings {
    /// Number of proposals returned when the caller does not ask for a count
    pub top_k: usize,
    /// Collapse a subset and its complement into one proposal
    pub dedupe_complements: bool,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            top_k: 3,
            dedupe_complements: true,
        }
    }
}
