//! Hosted events: a user offers to teach, or asks to learn, one skill at a
//! scheduled time. Connection requests may reference an event.

use chrono::{DateTime, Utc};
use skx_core::entities::Event;
use skx_core::enums::{EntityType, EventType, SkillLevel};
use skx_core::repository::{EventFilter, NewEvent, Repository};

use crate::{EngineError, EngineResult, SkillExchange};

/// Input for `SkillExchange::create_event`. The skill is named, not
/// referenced, and joins the catalog on first use.
#[derive(Debug, Clone)]
pub struct EventDraft<'a> {
    pub host_id: &'a str,
    pub skill_name: &'a str,
    pub event_type: EventType,
    pub level: SkillLevel,
    pub description: &'a str,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

impl<R: Repository> SkillExchange<R> {
    /// Publish an event for `draft.host_id`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for a blank skill name or description, or a zero
    ///   duration
    /// - `NotFound` if the host does not exist
    pub async fn create_event(&self, draft: &EventDraft<'_>) -> EngineResult<Event> {
        let description = draft.description.trim();
        if description.is_empty() {
            return Err(EngineError::invalid_request("event description must not be empty"));
        }
        if draft.duration_minutes == 0 {
            return Err(EngineError::invalid_request("event duration must be positive"));
        }
        self.require_user(draft.host_id).await?;

        let Some(skill) = self
            .resolve_skills(&[draft.skill_name.to_string()])
            .await?
            .into_iter()
            .next()
        else {
            return Err(EngineError::invalid_request("event skill must not be empty"));
        };

        let event = self
            .repo
            .create_event(&NewEvent {
                host_id: draft.host_id,
                skill_id: &skill.id,
                event_type: draft.event_type,
                level: draft.level,
                description,
                scheduled_at: draft.scheduled_at,
                duration_minutes: draft.duration_minutes,
            })
            .await?;
        tracing::info!(
            event_id = %event.id,
            host_id = draft.host_id,
            skill = %event.skill_name,
            event_type = %event.event_type,
            "event published"
        );
        Ok(event)
    }

    /// # Errors
    ///
    /// `NotFound` if the event does not exist.
    pub async fn get_event(&self, event_id: &str) -> EngineResult<Event> {
        self.repo
            .find_event_by_id(event_id)
            .await?
            .ok_or_else(|| EngineError::not_found(EntityType::Event, event_id))
    }

    /// Events matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// `StorageFailure` if the repository cannot be read.
    pub async fn list_events(&self, filter: &EventFilter<'_>) -> EngineResult<Vec<Event>> {
        Ok(self.repo.list_events(filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::test_support::helpers::test_engine;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn draft<'a>(host_id: &'a str, skill_name: &'a str, description: &'a str) -> EventDraft<'a> {
        EventDraft {
            host_id,
            skill_name,
            event_type: EventType::Teach,
            level: SkillLevel::Beginner,
            description,
            scheduled_at: Utc.with_ymd_and_hms(2026, 11, 2, 18, 30, 0).unwrap(),
            duration_minutes: 60,
        }
    }

    #[tokio::test]
    async fn create_event_upserts_the_skill() {
        let engine = test_engine().await;
        let host = engine.create_user("Teo", None).await.unwrap();

        let event = engine
            .create_event(&draft(&host.id, " Guitar ", "  Open chords  "))
            .await
            .unwrap();
        assert_eq!(event.skill_name, "Guitar");
        assert_eq!(event.description, "Open chords");
        assert_eq!(engine.get_event(&event.id).await.unwrap(), event);

        let again = engine
            .create_event(&draft(&host.id, "Guitar", "Barre chords"))
            .await
            .unwrap();
        assert_eq!(again.skill_id, event.skill_id);
    }

    #[rstest]
    #[case::blank_description("Guitar", "   ", 60)]
    #[case::blank_skill("  ", "Open chords", 60)]
    #[case::zero_duration("Guitar", "Open chords", 0)]
    #[tokio::test]
    async fn malformed_event_is_invalid(
        #[case] skill: &str,
        #[case] description: &str,
        #[case] minutes: u32,
    ) {
        let engine = test_engine().await;
        let host = engine.create_user("Teo", None).await.unwrap();
        let mut draft = draft(&host.id, skill, description);
        draft.duration_minutes = minutes;

        let err = engine.create_event(&draft).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert!(engine.list_events(&EventFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_host_is_not_found() {
        let engine = test_engine().await;
        let err = engine
            .create_event(&draft("usr-nope", "Guitar", "Open chords"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { entity: EntityType::User, .. }));
    }

    #[tokio::test]
    async fn list_filters_by_type_level_and_search() {
        let engine = test_engine().await;
        let host = engine.create_user("Teo", None).await.unwrap();
        engine
            .create_event(&draft(&host.id, "Guitar", "Open chords"))
            .await
            .unwrap();
        let mut learn = draft(&host.id, "Rust", "Help me with lifetimes");
        learn.event_type = EventType::Learn;
        learn.level = SkillLevel::Intermediate;
        let learn = engine.create_event(&learn).await.unwrap();

        let all = engine.list_events(&EventFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, learn.id);

        let learning = engine
            .list_events(&EventFilter {
                event_type: Some(EventType::Learn),
                level: Some(SkillLevel::Intermediate),
                search: Some("LIFETIMES"),
            })
            .await
            .unwrap();
        assert_eq!(learning, vec![learn]);

        let advanced = engine
            .list_events(&EventFilter {
                level: Some(SkillLevel::Advanced),
                ..EventFilter::default()
            })
            .await
            .unwrap();
        assert!(advanced.is_empty());
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let engine = test_engine().await;
        let err = engine.get_event("evt-nope").await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound { entity: EntityType::Event, .. }));
    }
}
