use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ResolutionOutcome;

/// A completed teaching encounter, identified by an opaque `id`.
///
/// The first review registers the descriptor. Every later submission for the
/// same `id` must present an identical one, so the participants, the duration
/// and the covered skills are fixed from then on.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub teacher_id: String,
    pub learner_id: String,
    pub duration_minutes: u32,
    /// Skills the session covered. Per-skill evaluations must name one of these.
    #[serde(default)]
    pub skill_ids: BTreeSet<String>,
}

impl Session {
    #[must_use]
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.teacher_id == user_id || self.learner_id == user_id
    }

    #[must_use]
    pub fn covers_skill(&self, skill_id: &str) -> bool {
        self.skill_ids.contains(skill_id)
    }
}

/// The consensus verdict for a session, written exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SessionResolution {
    pub session_id: String,
    pub teacher_id: String,
    pub learner_id: String,
    pub duration_minutes: u32,
    pub average_rating: f64,
    pub review_count: u32,
    pub outcome: ResolutionOutcome,
    pub resolved_at: DateTime<Utc>,
}
