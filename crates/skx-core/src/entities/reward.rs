use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ledger row granting tokens to a session's teacher. One per session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TokenReward {
    pub id: String,
    pub session_id: String,
    pub recipient_id: String,
    pub amount: i64,
    pub duration_minutes: u32,
    pub created_at: DateTime<Utc>,
}
