//! Engine error taxonomy.
//!
//! Every variant carries the offending identifiers as fields. Only
//! `StorageFailure` is retryable; the engine never retries internally.

use serde::Serialize;
use skx_core::enums::{ConnectionStatus, EntityType};
use skx_core::errors::StoreError;
use std::fmt;
use thiserror::Error;

/// Errors returned by `SkillExchange` operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityType, id: String },

    /// `actor` is not allowed to act on the entity.
    #[error("user {actor} is not allowed to act on {entity} {id}")]
    Forbidden {
        actor: String,
        entity: EntityType,
        id: String,
    },

    /// The connection is not in a state that allows the requested move.
    #[error("connection {connection_id} cannot move from {from} to {to}")]
    InvalidTransition {
        connection_id: String,
        from: ConnectionStatus,
        to: ConnectionStatus,
    },

    /// The request is malformed independent of stored state.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// A connection already exists for the unordered user pair.
    #[error("users {from_user} and {to_user} are already connected (connection {existing_id})")]
    AlreadyConnected {
        from_user: String,
        to_user: String,
        existing_id: String,
    },

    /// A review or per-skill rating outside 1..=5.
    #[error(
        "rating {rating}{} is outside 1..=5",
        .skill_id.as_deref().map(|s| format!(" for skill {s}")).unwrap_or_default()
    )]
    InvalidRating { rating: u8, skill_id: Option<String> },

    /// The session resolved as declined, so it never earns a reward.
    #[error("session {session_id} was declined and cannot be rewarded")]
    RewardDeclined { session_id: String },

    /// The repository failed. Safe to retry the whole operation.
    #[error("storage failure: {0}")]
    StorageFailure(#[from] StoreError),
}

/// The kind of an `EngineError`, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    InvalidTransition,
    InvalidRequest,
    AlreadyConnected,
    InvalidRating,
    RewardDeclined,
    StorageFailure,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::InvalidTransition => "invalid_transition",
            Self::InvalidRequest => "invalid_request",
            Self::AlreadyConnected => "already_connected",
            Self::InvalidRating => "invalid_rating",
            Self::RewardDeclined => "reward_declined",
            Self::StorageFailure => "storage_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EngineError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            Self::AlreadyConnected { .. } => ErrorKind::AlreadyConnected,
            Self::InvalidRating { .. } => ErrorKind::InvalidRating,
            Self::RewardDeclined { .. } => ErrorKind::RewardDeclined,
            Self::StorageFailure(_) => ErrorKind::StorageFailure,
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageFailure(_))
    }

    pub(crate) fn not_found(entity: EntityType, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub(crate) fn forbidden(
        actor: impl Into<String>,
        entity: EntityType,
        id: impl Into<String>,
    ) -> Self {
        Self::Forbidden {
            actor: actor.into(),
            entity,
            id: id.into(),
        }
    }

    pub(crate) fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_storage_failures_are_retryable() {
        let storage = EngineError::from(StoreError::Backend("disk full".into()));
        assert!(storage.is_retryable());
        assert_eq!(storage.kind(), ErrorKind::StorageFailure);

        let missing = EngineError::not_found(EntityType::Connection, "con-1");
        assert!(!missing.is_retryable());
        assert_eq!(missing.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn rating_message_names_the_skill() {
        let overall = EngineError::InvalidRating {
            rating: 6,
            skill_id: None,
        };
        assert_eq!(overall.to_string(), "rating 6 is outside 1..=5");

        let per_skill = EngineError::InvalidRating {
            rating: 0,
            skill_id: Some("skl-1".into()),
        };
        assert_eq!(per_skill.to_string(), "rating 0 for skill skl-1 is outside 1..=5");
    }

    #[test]
    fn messages_carry_identifiers() {
        let err = EngineError::InvalidTransition {
            connection_id: "con-1".into(),
            from: ConnectionStatus::Accepted,
            to: ConnectionStatus::Rejected,
        };
        assert_eq!(
            err.to_string(),
            "connection con-1 cannot move from accepted to rejected"
        );
        let declined = EngineError::RewardDeclined {
            session_id: "ses-1".into(),
        };
        assert_eq!(declined.kind().as_str(), "reward_declined");
        assert!(declined.to_string().contains("ses-1"));

        let forbidden = EngineError::forbidden("usr-x", EntityType::ChatRoom, "cht-1");
        assert_eq!(forbidden.kind().to_string(), "forbidden");
        assert!(forbidden.to_string().contains("chat_room cht-1"));
    }
}
