use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EventType, SkillLevel};

/// A posted offer to teach or a request to learn one skill at a set time.
///
/// Connections may point back at the event that prompted them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub host_id: String,
    pub skill_id: String,
    /// Denormalized from the skill catalog for display and search.
    pub skill_name: String,
    pub event_type: EventType,
    pub level: SkillLevel,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub created_at: DateTime<Utc>,
}
