//! `Repository` implementation for `SkxStore`.
//!
//! Thin delegation to the inherent repo methods; the only work done here is
//! error translation into `StoreError`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use skx_core::entities::{
    ChatRoom, Connection, Event, Message, Review, Session, SessionResolution, Skill, TokenReward,
    User,
};
use skx_core::enums::ConnectionStatus;
use skx_core::repository::{
    EventFilter, FindOrCreate, NewConnection, NewEvent, NewReview, NewTokenReward, Repository,
    ReviewWrite, StoreResult,
};

use crate::store::SkxStore;

#[async_trait]
impl Repository for SkxStore {
    async fn create_user(&self, name: &str, location: Option<&str>) -> StoreResult<User> {
        Ok(Self::create_user(self, name, location).await?)
    }

    async fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.find_user(id).await?)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(Self::list_users(self).await?)
    }

    async fn set_user_skills(
        &self,
        user_id: &str,
        teaches: &[String],
        learns: &[String],
    ) -> StoreResult<User> {
        Ok(Self::set_user_skills(self, user_id, teaches, learns).await?)
    }

    async fn find_skills_by_name(&self, names: &[String]) -> StoreResult<Vec<Skill>> {
        Ok(self.upsert_skills(names).await?)
    }

    async fn find_skill_by_id(&self, id: &str) -> StoreResult<Option<Skill>> {
        Ok(self.find_skill(id).await?)
    }

    async fn find_skill_ratings(&self, skill_id: &str) -> StoreResult<Vec<u8>> {
        Ok(self.skill_ratings(skill_id).await?)
    }

    async fn update_skill_aggregate(
        &self,
        skill_id: &str,
        average_rating: f64,
        rating_count: u32,
    ) -> StoreResult<()> {
        Ok(Self::update_skill_aggregate(self, skill_id, average_rating, rating_count).await?)
    }

    async fn create_event(&self, new: &NewEvent<'_>) -> StoreResult<Event> {
        Ok(Self::create_event(self, new).await?)
    }

    async fn find_event_by_id(&self, id: &str) -> StoreResult<Option<Event>> {
        Ok(self.find_event(id).await?)
    }

    async fn list_events(&self, filter: &EventFilter<'_>) -> StoreResult<Vec<Event>> {
        Ok(Self::list_events(self, filter).await?)
    }

    async fn find_connection_by_id(&self, id: &str) -> StoreResult<Option<Connection>> {
        Ok(self.find_connection(id).await?)
    }

    async fn find_connection_by_user_pair(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> StoreResult<Option<Connection>> {
        Ok(self.find_connection_by_pair(user_a, user_b).await?)
    }

    async fn list_connections_for_user(
        &self,
        user_id: &str,
        status: Option<ConnectionStatus>,
    ) -> StoreResult<Vec<Connection>> {
        Ok(Self::list_connections_for_user(self, user_id, status).await?)
    }

    async fn create_connection(&self, new: &NewConnection<'_>) -> StoreResult<Connection> {
        Ok(Self::create_connection(self, new).await?)
    }

    async fn update_connection_status(
        &self,
        id: &str,
        expected: &[ConnectionStatus],
        next: ConnectionStatus,
    ) -> StoreResult<Option<Connection>> {
        Ok(Self::update_connection_status(self, id, expected, next).await?)
    }

    async fn find_chat_room_by_connection(
        &self,
        connection_id: &str,
    ) -> StoreResult<Option<ChatRoom>> {
        Ok(Self::find_chat_room_by_connection(self, connection_id).await?)
    }

    async fn find_chat_room_by_id(&self, id: &str) -> StoreResult<Option<ChatRoom>> {
        Ok(self.find_chat_room(id).await?)
    }

    async fn create_chat_room(
        &self,
        connection_id: &str,
        last_message_at: DateTime<Utc>,
    ) -> StoreResult<FindOrCreate<ChatRoom>> {
        Ok(Self::create_chat_room(self, connection_id, last_message_at).await?)
    }

    async fn create_message(
        &self,
        chat_room_id: &str,
        sender_id: &str,
        content: &str,
    ) -> StoreResult<Message> {
        Ok(Self::create_message(self, chat_room_id, sender_id, content).await?)
    }

    async fn list_messages(&self, chat_room_id: &str, limit: u32) -> StoreResult<Vec<Message>> {
        Ok(Self::list_messages(self, chat_room_id, limit).await?)
    }

    async fn register_session(&self, session: &Session) -> StoreResult<FindOrCreate<Session>> {
        Ok(Self::register_session(self, session).await?)
    }

    async fn find_session(&self, session_id: &str) -> StoreResult<Option<Session>> {
        Ok(Self::find_session(self, session_id).await?)
    }

    async fn find_reviews_by_session(&self, session_id: &str) -> StoreResult<Vec<Review>> {
        Ok(Self::find_reviews_by_session(self, session_id).await?)
    }

    async fn create_review(&self, new: &NewReview<'_>) -> StoreResult<ReviewWrite> {
        Ok(Self::create_review(self, new).await?)
    }

    async fn list_reviews_by_reviewer(&self, reviewer_id: &str) -> StoreResult<Vec<Review>> {
        Ok(Self::list_reviews_by_reviewer(self, reviewer_id).await?)
    }

    async fn find_session_resolution(
        &self,
        session_id: &str,
    ) -> StoreResult<Option<SessionResolution>> {
        Ok(Self::find_session_resolution(self, session_id).await?)
    }

    async fn record_session_resolution(
        &self,
        resolution: &SessionResolution,
    ) -> StoreResult<FindOrCreate<SessionResolution>> {
        Ok(Self::record_session_resolution(self, resolution).await?)
    }

    async fn find_token_reward_by_session(
        &self,
        session_id: &str,
    ) -> StoreResult<Option<TokenReward>> {
        Ok(Self::find_token_reward_by_session(self, session_id).await?)
    }

    async fn create_token_reward(
        &self,
        new: &NewTokenReward<'_>,
    ) -> StoreResult<FindOrCreate<TokenReward>> {
        Ok(Self::create_token_reward(self, new).await?)
    }

    async fn list_token_rewards_for_recipient(
        &self,
        recipient_id: &str,
    ) -> StoreResult<Vec<TokenReward>> {
        Ok(Self::list_token_rewards_for_recipient(self, recipient_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_store;
    use skx_core::errors::StoreError;

    fn as_repo(store: &SkxStore) -> &dyn Repository {
        store
    }

    #[tokio::test]
    async fn duplicate_pair_surfaces_as_conflict() {
        let store = test_store().await;
        let repo = as_repo(&store);
        let a = repo.create_user("Ada", None).await.unwrap().id;
        let b = repo.create_user("Bo", None).await.unwrap().id;

        repo.create_connection(&NewConnection {
            from_user_id: &a,
            to_user_id: &b,
            event_id: None,
            message: "hi",
        })
        .await
        .unwrap();
        let err = repo
            .create_connection(&NewConnection {
                from_user_id: &b,
                to_user_id: &a,
                event_id: Some("evt-1"),
                message: "hi back",
            })
            .await
            .unwrap_err();
        assert!(err.is_conflict(), "{err}");
    }

    #[tokio::test]
    async fn missing_skill_aggregate_is_backend_error() {
        let store = test_store().await;
        let repo = as_repo(&store);
        let err = repo
            .update_skill_aggregate("skl-nope", 1.0, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)), "{err}");
    }

    #[tokio::test]
    async fn skills_by_name_upserts() {
        let store = test_store().await;
        let repo = as_repo(&store);
        let skills = repo
            .find_skills_by_name(&["Guitar".into(), "Guitar".into()])
            .await
            .unwrap();
        assert_eq!(skills.len(), 1);
        let found = repo.find_skill_by_id(&skills[0].id).await.unwrap();
        assert_eq!(found.map(|s| s.name), Some("Guitar".to_string()));
    }
}
