//! The storage contract consumed by the engine.
//!
//! The engine never talks to a database directly; it is handed a
//! `Repository` and calls these operations. Every "create" operation that the
//! engine relies on for idempotency (`create_chat_room`, `register_session`,
//! `record_session_resolution`, `create_token_reward`) must be atomic
//! create-if-absent in the implementation: racing callers for the same key
//! must all observe the same stored row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    ChatRoom, Connection, Event, Message, Review, Session, SessionResolution, Skill,
    SkillEvaluation, TokenReward, User,
};
use crate::enums::{ConnectionStatus, EventType, SkillLevel};
use crate::errors::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of an atomic find-or-create: the stored row and whether this call
/// inserted it.
#[derive(Debug, Clone, PartialEq)]
pub struct FindOrCreate<T> {
    pub value: T,
    pub created: bool,
}

impl<T> FindOrCreate<T> {
    #[must_use]
    pub const fn created(value: T) -> Self {
        Self {
            value,
            created: true,
        }
    }

    #[must_use]
    pub const fn existing(value: T) -> Self {
        Self {
            value,
            created: false,
        }
    }
}

/// Input for `Repository::create_connection`.
#[derive(Debug, Clone)]
pub struct NewConnection<'a> {
    pub from_user_id: &'a str,
    pub to_user_id: &'a str,
    pub event_id: Option<&'a str>,
    pub message: &'a str,
}

/// Input for `Repository::create_event`. `skill_id` must already exist.
#[derive(Debug, Clone)]
pub struct NewEvent<'a> {
    pub host_id: &'a str,
    pub skill_id: &'a str,
    pub event_type: EventType,
    pub level: SkillLevel,
    pub description: &'a str,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// Filters for `Repository::list_events`. `None` means "any".
#[derive(Debug, Clone, Copy, Default)]
pub struct EventFilter<'a> {
    pub event_type: Option<EventType>,
    pub level: Option<SkillLevel>,
    /// Case-insensitive substring of the description or the skill name.
    pub search: Option<&'a str>,
}

/// Input for `Repository::create_review`.
#[derive(Debug, Clone)]
pub struct NewReview<'a> {
    pub session_id: &'a str,
    pub reviewer_id: &'a str,
    pub rating: u8,
    pub feedback: Option<&'a str>,
    pub skill_evaluations: &'a [SkillEvaluation],
}

/// Outcome of `Repository::create_review`.
///
/// A second submission by the same reviewer for the same session overwrites
/// the first; `replaced` carries the overwritten review so callers can
/// recompute aggregates for skills that dropped out.
#[derive(Debug, Clone)]
pub struct ReviewWrite {
    pub review: Review,
    pub replaced: Option<Review>,
}

/// Input for `Repository::create_token_reward`.
#[derive(Debug, Clone)]
pub struct NewTokenReward<'a> {
    pub session_id: &'a str,
    pub recipient_id: &'a str,
    pub amount: i64,
    pub duration_minutes: u32,
}

#[async_trait]
pub trait Repository: Send + Sync {
    // -- users ---------------------------------------------------------------

    async fn create_user(&self, name: &str, location: Option<&str>) -> StoreResult<User>;

    async fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Replace both skill sets of a user with the given skill IDs.
    async fn set_user_skills(
        &self,
        user_id: &str,
        teaches: &[String],
        learns: &[String],
    ) -> StoreResult<User>;

    // -- skills --------------------------------------------------------------

    /// Batch upsert-by-name: every name gets a skill row, existing ones are
    /// reused. Returned in the order of first appearance in `names`.
    async fn find_skills_by_name(&self, names: &[String]) -> StoreResult<Vec<Skill>>;

    async fn find_skill_by_id(&self, id: &str) -> StoreResult<Option<Skill>>;

    /// Every per-skill rating ever recorded for `skill_id`, across all reviews.
    async fn find_skill_ratings(&self, skill_id: &str) -> StoreResult<Vec<u8>>;

    async fn update_skill_aggregate(
        &self,
        skill_id: &str,
        average_rating: f64,
        rating_count: u32,
    ) -> StoreResult<()>;

    // -- events --------------------------------------------------------------

    async fn create_event(&self, new: &NewEvent<'_>) -> StoreResult<Event>;

    async fn find_event_by_id(&self, id: &str) -> StoreResult<Option<Event>>;

    /// Events matching `filter`, newest first.
    async fn list_events(&self, filter: &EventFilter<'_>) -> StoreResult<Vec<Event>>;

    // -- connections ---------------------------------------------------------

    async fn find_connection_by_id(&self, id: &str) -> StoreResult<Option<Connection>>;

    /// Look up the connection for an unordered pair, in either direction.
    async fn find_connection_by_user_pair(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> StoreResult<Option<Connection>>;

    /// Connections where `user_id` is either party, newest first.
    async fn list_connections_for_user(
        &self,
        user_id: &str,
        status: Option<ConnectionStatus>,
    ) -> StoreResult<Vec<Connection>>;

    /// Insert a pending connection. Fails with `StoreError::Conflict` if the
    /// unordered pair already has one.
    async fn create_connection(&self, new: &NewConnection<'_>) -> StoreResult<Connection>;

    /// Conditionally move a connection to `next`. The write only applies if
    /// the current status is one of `expected`; returns `None` when it did not.
    async fn update_connection_status(
        &self,
        id: &str,
        expected: &[ConnectionStatus],
        next: ConnectionStatus,
    ) -> StoreResult<Option<Connection>>;

    // -- chat ----------------------------------------------------------------

    async fn find_chat_room_by_connection(
        &self,
        connection_id: &str,
    ) -> StoreResult<Option<ChatRoom>>;

    async fn find_chat_room_by_id(&self, id: &str) -> StoreResult<Option<ChatRoom>>;

    /// Atomic create-if-absent keyed by `connection_id`.
    async fn create_chat_room(
        &self,
        connection_id: &str,
        last_message_at: DateTime<Utc>,
    ) -> StoreResult<FindOrCreate<ChatRoom>>;

    /// Append a message and bump the room's `last_message_at`.
    async fn create_message(
        &self,
        chat_room_id: &str,
        sender_id: &str,
        content: &str,
    ) -> StoreResult<Message>;

    /// The latest `limit` messages in a room, oldest first.
    async fn list_messages(&self, chat_room_id: &str, limit: u32) -> StoreResult<Vec<Message>>;

    // -- sessions ------------------------------------------------------------

    /// Atomic create-if-absent keyed by `session.id`. An existing descriptor
    /// is returned untouched with `created == false`, whatever was passed.
    async fn register_session(&self, session: &Session) -> StoreResult<FindOrCreate<Session>>;

    async fn find_session(&self, session_id: &str) -> StoreResult<Option<Session>>;

    // -- reviews -------------------------------------------------------------

    async fn find_reviews_by_session(&self, session_id: &str) -> StoreResult<Vec<Review>>;

    /// Insert or overwrite the review for `(session_id, reviewer_id)`.
    async fn create_review(&self, new: &NewReview<'_>) -> StoreResult<ReviewWrite>;

    async fn list_reviews_by_reviewer(&self, reviewer_id: &str) -> StoreResult<Vec<Review>>;

    // -- resolutions ---------------------------------------------------------

    async fn find_session_resolution(
        &self,
        session_id: &str,
    ) -> StoreResult<Option<SessionResolution>>;

    /// Atomic create-if-absent keyed by `session_id`. A losing racer gets the
    /// winner's row back with `created == false`.
    async fn record_session_resolution(
        &self,
        resolution: &SessionResolution,
    ) -> StoreResult<FindOrCreate<SessionResolution>>;

    // -- rewards -------------------------------------------------------------

    async fn find_token_reward_by_session(
        &self,
        session_id: &str,
    ) -> StoreResult<Option<TokenReward>>;

    /// Atomic create-if-absent keyed by `session_id`.
    async fn create_token_reward(
        &self,
        new: &NewTokenReward<'_>,
    ) -> StoreResult<FindOrCreate<TokenReward>>;

    /// Rewards received by `recipient_id`, newest first.
    async fn list_token_rewards_for_recipient(
        &self,
        recipient_id: &str,
    ) -> StoreResult<Vec<TokenReward>>;
}
