use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Review, TokenReward};

/// One row of a user's session history: a review they wrote or a reward
/// they received.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum HistoryEntry {
    Review(Review),
    Reward(TokenReward),
}

impl HistoryEntry {
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Review(review) => review.updated_at,
            Self::Reward(reward) => reward.created_at,
        }
    }
}

/// Dashboard counters for a single user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserStats {
    pub user_id: String,
    pub skills_taught: u32,
    pub skills_learned: u32,
    pub active_connections: u32,
    pub total_tokens: i64,
}
