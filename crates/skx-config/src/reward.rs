//! Token reward policy.
//!
//! Historically the application granted 2 tokens per minute in one flow and
//! 1 token per hour in another. The rate is configuration here; the default
//! is 2 per minute.

use serde::{Deserialize, Serialize};
use skx_core::enums::RateUnit;

const fn default_rate() -> u32 {
    2
}

const fn default_threshold() -> f64 {
    3.0
}

/// Lowest and highest rating a review can carry.
pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RewardConfig {
    /// Tokens granted per `unit` of session duration.
    #[serde(default = "default_rate")]
    pub rate: u32,

    /// Duration unit the rate is expressed in.
    #[serde(default)]
    pub unit: RateUnit,

    /// A resolved session pays out when its average rating is at least this.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            unit: RateUnit::default(),
            threshold: default_threshold(),
        }
    }
}

impl RewardConfig {
    /// Tokens owed for a session of `duration_minutes`.
    ///
    /// Hourly rates are prorated and floored to whole tokens.
    #[must_use]
    pub fn amount_for(&self, duration_minutes: u32) -> i64 {
        let minutes = i64::from(duration_minutes);
        let rate = i64::from(self.rate);
        match self.unit {
            RateUnit::Minute => minutes * rate,
            RateUnit::Hour => minutes * rate / 60,
        }
    }

    /// Whether an average rating clears the payout threshold.
    #[must_use]
    pub fn clears_threshold(&self, average_rating: f64) -> bool {
        average_rating >= self.threshold
    }

    #[must_use]
    pub fn threshold_in_range(&self) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&self.threshold)
    }
}
