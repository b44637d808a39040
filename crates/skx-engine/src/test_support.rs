//! Shared test utilities for skx-engine unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use skx_config::SkxConfig;
    use skx_core::entities::{
        ChatRoom, Connection, Event, Message, Review, Session, SessionResolution, Skill,
        TokenReward, User,
    };
    use skx_core::enums::ConnectionStatus;
    use skx_core::errors::StoreError;
    use skx_core::repository::{
        EventFilter, FindOrCreate, NewConnection, NewEvent, NewReview, NewTokenReward,
        Repository, ReviewWrite, StoreResult,
    };
    use skx_db::SkxStore;

    use crate::SkillExchange;

    /// Engine over an in-memory store with default configuration.
    pub async fn test_engine() -> SkillExchange<SkxStore> {
        test_engine_with(&SkxConfig::default()).await
    }

    pub async fn test_engine_with(config: &SkxConfig) -> SkillExchange<SkxStore> {
        let store = SkxStore::open_local(":memory:").await.unwrap();
        SkillExchange::new(store, config)
    }

    /// Engine whose repository yields to the scheduler before every call, so
    /// futures raced with `tokio::join!` interleave at each storage step.
    pub async fn interleaved_engine() -> SkillExchange<Interleaved> {
        let store = SkxStore::open_local(":memory:").await.unwrap();
        SkillExchange::new(
            Interleaved {
                store,
                refuse_connections: false,
            },
            &SkxConfig::default(),
        )
    }

    /// Engine whose repository reports a pair conflict on every
    /// `create_connection` without ever storing a row.
    pub async fn refusing_engine() -> SkillExchange<Interleaved> {
        let store = SkxStore::open_local(":memory:").await.unwrap();
        SkillExchange::new(
            Interleaved {
                store,
                refuse_connections: true,
            },
            &SkxConfig::default(),
        )
    }

    /// Onboard a user with the given skill names.
    pub async fn user_with_skills<R: Repository>(
        engine: &SkillExchange<R>,
        name: &str,
        teaches: &[&str],
        learns: &[&str],
    ) -> User {
        let user = engine.create_user(name, None).await.unwrap();
        let teaches: Vec<String> = teaches.iter().map(ToString::to_string).collect();
        let learns: Vec<String> = learns.iter().map(ToString::to_string).collect();
        engine
            .update_user_skills(&user.id, &teaches, &learns)
            .await
            .unwrap()
    }

    /// Onboard a teacher and a learner and describe a session between them.
    pub async fn session_between<R: Repository>(
        engine: &SkillExchange<R>,
        session_id: &str,
        duration_minutes: u32,
    ) -> Session {
        let teacher = user_with_skills(engine, "Teo", &["Guitar"], &[]).await;
        let learner = user_with_skills(engine, "Lia", &[], &["Guitar"]).await;
        Session {
            id: session_id.to_string(),
            teacher_id: teacher.id,
            learner_id: learner.id,
            duration_minutes,
            skill_ids: teacher.teaches,
        }
    }

    pub struct Interleaved {
        store: SkxStore,
        refuse_connections: bool,
    }

    async fn yield_now() {
        tokio::task::yield_now().await;
    }

    #[async_trait]
    impl Repository for Interleaved {
        async fn create_user(&self, name: &str, location: Option<&str>) -> StoreResult<User> {
            yield_now().await;
            Repository::create_user(&self.store, name, location).await
        }

        async fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>> {
            yield_now().await;
            Repository::find_user_by_id(&self.store, id).await
        }

        async fn list_users(&self) -> StoreResult<Vec<User>> {
            yield_now().await;
            Repository::list_users(&self.store).await
        }

        async fn set_user_skills(
            &self,
            user_id: &str,
            teaches: &[String],
            learns: &[String],
        ) -> StoreResult<User> {
            yield_now().await;
            Repository::set_user_skills(&self.store, user_id, teaches, learns).await
        }

        async fn find_skills_by_name(&self, names: &[String]) -> StoreResult<Vec<Skill>> {
            yield_now().await;
            Repository::find_skills_by_name(&self.store, names).await
        }

        async fn find_skill_by_id(&self, id: &str) -> StoreResult<Option<Skill>> {
            yield_now().await;
            Repository::find_skill_by_id(&self.store, id).await
        }

        async fn find_skill_ratings(&self, skill_id: &str) -> StoreResult<Vec<u8>> {
            yield_now().await;
            Repository::find_skill_ratings(&self.store, skill_id).await
        }

        async fn update_skill_aggregate(
            &self,
            skill_id: &str,
            average_rating: f64,
            rating_count: u32,
        ) -> StoreResult<()> {
            yield_now().await;
            Repository::update_skill_aggregate(&self.store, skill_id, average_rating, rating_count)
                .await
        }

        async fn create_event(&self, new: &NewEvent<'_>) -> StoreResult<Event> {
            yield_now().await;
            Repository::create_event(&self.store, new).await
        }

        async fn find_event_by_id(&self, id: &str) -> StoreResult<Option<Event>> {
            yield_now().await;
            Repository::find_event_by_id(&self.store, id).await
        }

        async fn list_events(&self, filter: &EventFilter<'_>) -> StoreResult<Vec<Event>> {
            yield_now().await;
            Repository::list_events(&self.store, filter).await
        }

        async fn find_connection_by_id(&self, id: &str) -> StoreResult<Option<Connection>> {
            yield_now().await;
            Repository::find_connection_by_id(&self.store, id).await
        }

        async fn find_connection_by_user_pair(
            &self,
            user_a: &str,
            user_b: &str,
        ) -> StoreResult<Option<Connection>> {
            yield_now().await;
            Repository::find_connection_by_user_pair(&self.store, user_a, user_b).await
        }

        async fn list_connections_for_user(
            &self,
            user_id: &str,
            status: Option<ConnectionStatus>,
        ) -> StoreResult<Vec<Connection>> {
            yield_now().await;
            Repository::list_connections_for_user(&self.store, user_id, status).await
        }

        async fn create_connection(&self, new: &NewConnection<'_>) -> StoreResult<Connection> {
            yield_now().await;
            if self.refuse_connections {
                return Err(StoreError::Conflict("connections.pair_low".into()));
            }
            Repository::create_connection(&self.store, new).await
        }

        async fn update_connection_status(
            &self,
            id: &str,
            expected: &[ConnectionStatus],
            next: ConnectionStatus,
        ) -> StoreResult<Option<Connection>> {
            yield_now().await;
            Repository::update_connection_status(&self.store, id, expected, next).await
        }

        async fn find_chat_room_by_connection(
            &self,
            connection_id: &str,
        ) -> StoreResult<Option<ChatRoom>> {
            yield_now().await;
            Repository::find_chat_room_by_connection(&self.store, connection_id).await
        }

        async fn find_chat_room_by_id(&self, id: &str) -> StoreResult<Option<ChatRoom>> {
            yield_now().await;
            Repository::find_chat_room_by_id(&self.store, id).await
        }

        async fn create_chat_room(
            &self,
            connection_id: &str,
            last_message_at: DateTime<Utc>,
        ) -> StoreResult<FindOrCreate<ChatRoom>> {
            yield_now().await;
            Repository::create_chat_room(&self.store, connection_id, last_message_at).await
        }

        async fn create_message(
            &self,
            chat_room_id: &str,
            sender_id: &str,
            content: &str,
        ) -> StoreResult<Message> {
            yield_now().await;
            Repository::create_message(&self.store, chat_room_id, sender_id, content).await
        }

        async fn list_messages(
            &self,
            chat_room_id: &str,
            limit: u32,
        ) -> StoreResult<Vec<Message>> {
            yield_now().await;
            Repository::list_messages(&self.store, chat_room_id, limit).await
        }

        async fn register_session(
            &self,
            session: &Session,
        ) -> StoreResult<FindOrCreate<Session>> {
            yield_now().await;
            Repository::register_session(&self.store, session).await
        }

        async fn find_session(&self, session_id: &str) -> StoreResult<Option<Session>> {
            yield_now().await;
            Repository::find_session(&self.store, session_id).await
        }

        async fn find_reviews_by_session(&self, session_id: &str) -> StoreResult<Vec<Review>> {
            yield_now().await;
            Repository::find_reviews_by_session(&self.store, session_id).await
        }

        async fn create_review(&self, new: &NewReview<'_>) -> StoreResult<ReviewWrite> {
            yield_now().await;
            Repository::create_review(&self.store, new).await
        }

        async fn list_reviews_by_reviewer(&self, reviewer_id: &str) -> StoreResult<Vec<Review>> {
            yield_now().await;
            Repository::list_reviews_by_reviewer(&self.store, reviewer_id).await
        }

        async fn find_session_resolution(
            &self,
            session_id: &str,
        ) -> StoreResult<Option<SessionResolution>> {
            yield_now().await;
            Repository::find_session_resolution(&self.store, session_id).await
        }

        async fn record_session_resolution(
            &self,
            resolution: &SessionResolution,
        ) -> StoreResult<FindOrCreate<SessionResolution>> {
            yield_now().await;
            Repository::record_session_resolution(&self.store, resolution).await
        }

        async fn find_token_reward_by_session(
            &self,
            session_id: &str,
        ) -> StoreResult<Option<TokenReward>> {
            yield_now().await;
            Repository::find_token_reward_by_session(&self.store, session_id).await
        }

        async fn create_token_reward(
            &self,
            new: &NewTokenReward<'_>,
        ) -> StoreResult<FindOrCreate<TokenReward>> {
            yield_now().await;
            Repository::create_token_reward(&self.store, new).await
        }

        async fn list_token_rewards_for_recipient(
            &self,
            recipient_id: &str,
        ) -> StoreResult<Vec<TokenReward>> {
            yield_now().await;
            Repository::list_token_rewards_for_recipient(&self.store, recipient_id).await
        }
    }
}
