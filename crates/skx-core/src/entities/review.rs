use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One participant's review of a completed session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Review {
    pub id: String,
    pub session_id: String,
    pub reviewer_id: String,
    /// Overall rating: 1 (worst) to 5 (best).
    pub rating: u8,
    pub feedback: Option<String>,
    /// Ordered as submitted.
    pub skill_evaluations: Vec<SkillEvaluation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-skill rating attached to a review.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SkillEvaluation {
    pub skill_id: String,
    /// 1 to 5.
    pub rating: u8,
    pub feedback: Option<String>,
}
