//! # skx-engine
//!
//! The skill-exchange engine: skill catalog, bidirectional match scoring,
//! the connection state machine with chat-room provisioning, two-party review
//! consensus, and the idempotent token reward ledger.
//!
//! The engine owns no storage. It is handed a `Repository` and relies on the
//! repository's atomic find-or-create operations for every idempotency
//! guarantee, so concurrent callers for the same connection or session
//! converge on the same stored rows.
//!
//! Operations are split across modules as `impl SkillExchange` blocks:
//!
//! - [`catalog`]: onboarding and skill-set editing
//! - [`matching`]: the pure scorer and match listing
//! - [`events`]: hosted learn/teach events
//! - [`connection`]: request / respond / get / list
//! - [`chat`]: messages inside an accepted connection's room
//! - [`consensus`]: review submission and session resolution
//! - [`ledger`]: reward issuance and balances
//! - [`history`]: per-user history and stats

pub mod catalog;
pub mod chat;
pub mod connection;
pub mod consensus;
pub mod error;
pub mod events;
pub mod history;
pub mod ledger;
pub mod matching;

#[cfg(test)]
mod test_support;

use skx_config::{ConnectionConfig, MatchingConfig, RewardConfig, SkxConfig};
use skx_core::entities::User;
use skx_core::enums::EntityType;
use skx_core::repository::Repository;

pub use error::{EngineError, ErrorKind};

pub type EngineResult<T> = Result<T, EngineError>;

/// The engine handle. Cheap to share behind an `Arc`; holds no mutable state
/// of its own.
pub struct SkillExchange<R> {
    repo: R,
    reward: RewardConfig,
    matching: MatchingConfig,
    connection: ConnectionConfig,
}

impl<R: Repository> SkillExchange<R> {
    #[must_use]
    pub fn new(repo: R, config: &SkxConfig) -> Self {
        Self {
            repo,
            reward: config.reward.clone(),
            matching: config.matching.clone(),
            connection: config.connection.clone(),
        }
    }

    #[must_use]
    pub const fn repo(&self) -> &R {
        &self.repo
    }

    /// The reward policy in effect.
    #[must_use]
    pub const fn reward_policy(&self) -> &RewardConfig {
        &self.reward
    }

    pub(crate) async fn require_user(&self, user_id: &str) -> EngineResult<User> {
        self.repo
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| EngineError::not_found(EntityType::User, user_id))
    }
}
