use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named capability. `name` is unique and matched case-sensitively.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Skill {
    pub id: String,
    pub name: String,
    /// Mean of every per-skill rating ever recorded. 0.0 when unrated.
    pub average_rating: f64,
    pub rating_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
