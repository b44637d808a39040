use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ChatRoom;
use crate::enums::ConnectionStatus;

/// A directional request from `from_user_id` to `to_user_id`.
///
/// At most one connection exists per unordered user pair.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Connection {
    pub id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub event_id: Option<String>,
    pub message: String,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Connection {
    /// Whether `user_id` is the requester or the recipient.
    #[must_use]
    pub fn involves(&self, user_id: &str) -> bool {
        self.from_user_id == user_id || self.to_user_id == user_id
    }

    /// The other party, if `user_id` is one of the two.
    #[must_use]
    pub fn counterpart(&self, user_id: &str) -> Option<&str> {
        if self.from_user_id == user_id {
            Some(&self.to_user_id)
        } else if self.to_user_id == user_id {
            Some(&self.from_user_id)
        } else {
            None
        }
    }

    /// Order-independent key for the user pair: `(min, max)`.
    #[must_use]
    pub fn pair_key(&self) -> (&str, &str) {
        pair_key(&self.from_user_id, &self.to_user_id)
    }
}

/// Order-independent key for a user pair.
#[must_use]
pub fn pair_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

/// A connection together with its chat room, when one has been provisioned.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConnectionView {
    pub connection: Connection,
    pub chat_room: Option<ChatRoom>,
}
