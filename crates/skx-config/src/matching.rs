//! Match listing configuration.

use serde::{Deserialize, Serialize};

const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingConfig {
    /// Candidates scoring below this are left out of match listings.
    /// 0 keeps every eligible candidate.
    #[serde(default)]
    pub min_score: u32,

    /// Default result limit for match listings.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_score: 0,
            default_limit: default_limit(),
        }
    }
}
