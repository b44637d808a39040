//! Event repository — hosted learn/teach listings joined with their skill.

use skx_core::entities::Event;
use skx_core::ids::PREFIX_EVENT;
use skx_core::repository::{EventFilter, NewEvent};

use crate::error::DatabaseError;
use crate::helpers::{collect_rows, fmt_datetime, get_narrow, now, parse_datetime, parse_enum};
use crate::store::SkxStore;

const INSERT_COLS: &str = "id, host_id, skill_id, event_type, level, description, scheduled_at, \
                           duration_minutes, created_at";

const SELECT_JOINED: &str = "SELECT e.id, e.host_id, e.skill_id, s.name, e.event_type, e.level, \
                             e.description, e.scheduled_at, e.duration_minutes, e.created_at \
                             FROM events e JOIN skills s ON s.id = e.skill_id";

fn row_to_event(row: &libsql::Row) -> Result<Event, DatabaseError> {
    Ok(Event {
        id: row.get(0)?,
        host_id: row.get(1)?,
        skill_id: row.get(2)?,
        skill_name: row.get(3)?,
        event_type: parse_enum(&row.get::<String>(4)?)?,
        level: parse_enum(&row.get::<String>(5)?)?,
        description: row.get(6)?,
        scheduled_at: parse_datetime(&row.get::<String>(7)?)?,
        duration_minutes: get_narrow(row, 8)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

impl SkxStore {
    pub async fn create_event(&self, new: &NewEvent<'_>) -> Result<Event, DatabaseError> {
        let id = {
            let _gate = self.write_gate().await;
            let id = self.db().generate_id(PREFIX_EVENT).await?;
            self.db()
                .conn()
                .execute(
                    &format!(
                        "INSERT INTO events ({INSERT_COLS})
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                    ),
                    libsql::params![
                        id.as_str(),
                        new.host_id,
                        new.skill_id,
                        new.event_type.as_str(),
                        new.level.as_str(),
                        new.description,
                        fmt_datetime(&new.scheduled_at),
                        i64::from(new.duration_minutes),
                        fmt_datetime(&now())
                    ],
                )
                .await?;
            id
        };

        tracing::debug!(event_id = %id, host_id = new.host_id, "event created");
        self.find_event(&id).await?.ok_or(DatabaseError::NoResult)
    }

    pub async fn find_event(&self, id: &str) -> Result<Option<Event>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("{SELECT_JOINED} WHERE e.id = ?1"), [id])
            .await?;
        rows.next().await?.as_ref().map(row_to_event).transpose()
    }

    /// Events matching every set filter, newest first.
    ///
    /// `search` matches a case-insensitive substring of the description or
    /// the skill name.
    pub async fn list_events(&self, filter: &EventFilter<'_>) -> Result<Vec<Event>, DatabaseError> {
        let pattern = filter
            .search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s.to_lowercase()));
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "{SELECT_JOINED}
                     WHERE (?1 IS NULL OR e.event_type = ?1)
                       AND (?2 IS NULL OR e.level = ?2)
                       AND (?3 IS NULL OR lower(e.description) LIKE ?3 OR lower(s.name) LIKE ?3)
                     ORDER BY e.created_at DESC, e.rowid DESC"
                ),
                libsql::params![
                    filter.event_type.map(|t| t.as_str()),
                    filter.level.map(|l| l.as_str()),
                    pattern
                ],
            )
            .await?;
        collect_rows(rows, row_to_event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{test_store, two_users};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use skx_core::enums::{EventType, SkillLevel};

    async fn seed(store: &SkxStore) -> (String, Vec<Event>) {
        let (host, _) = two_users(store).await;
        let skills = store
            .upsert_skills(&["Guitar".into(), "Rust".into()])
            .await
            .unwrap();
        let when = Utc.with_ymd_and_hms(2026, 11, 2, 18, 30, 0).unwrap();
        let mut events = Vec::new();
        for (skill, event_type, level, description) in [
            (&skills[0].id, EventType::Teach, SkillLevel::Beginner, "Open chords, slowly"),
            (&skills[1].id, EventType::Learn, SkillLevel::Advanced, "Async traits deep dive"),
            (&skills[0].id, EventType::Learn, SkillLevel::Intermediate, "Fingerstyle basics"),
        ] {
            let event = store
                .create_event(&NewEvent {
                    host_id: &host,
                    skill_id: skill,
                    event_type,
                    level,
                    description,
                    scheduled_at: when,
                    duration_minutes: 60,
                })
                .await
                .unwrap();
            events.push(event);
        }
        (host, events)
    }

    fn descriptions(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.description.as_str()).collect()
    }

    #[tokio::test]
    async fn create_event_joins_skill_name() {
        let store = test_store().await;
        let (host, events) = seed(&store).await;

        let first = &events[0];
        assert!(first.id.starts_with("evt-"));
        assert_eq!(first.host_id, host);
        assert_eq!(first.skill_name, "Guitar");
        assert_eq!(first.duration_minutes, 60);
        assert_eq!(store.find_event(&first.id).await.unwrap().as_ref(), Some(first));
        assert_eq!(store.find_event("evt-nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = test_store().await;
        seed(&store).await;

        let all = store.list_events(&EventFilter::default()).await.unwrap();
        assert_eq!(
            descriptions(&all),
            vec!["Fingerstyle basics", "Async traits deep dive", "Open chords, slowly"]
        );
    }

    #[tokio::test]
    async fn filters_combine() {
        let store = test_store().await;
        seed(&store).await;

        let learn = store
            .list_events(&EventFilter {
                event_type: Some(EventType::Learn),
                ..EventFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(descriptions(&learn), vec!["Fingerstyle basics", "Async traits deep dive"]);

        let learn_advanced = store
            .list_events(&EventFilter {
                event_type: Some(EventType::Learn),
                level: Some(SkillLevel::Advanced),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(descriptions(&learn_advanced), vec!["Async traits deep dive"]);
    }

    #[tokio::test]
    async fn search_matches_description_or_skill_name() {
        let store = test_store().await;
        seed(&store).await;

        let by_skill = store
            .list_events(&EventFilter {
                search: Some("gUiTaR"),
                ..EventFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(by_skill.len(), 2);

        let by_description = store
            .list_events(&EventFilter {
                search: Some("ASYNC"),
                ..EventFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(descriptions(&by_description), vec!["Async traits deep dive"]);

        let blank = store
            .list_events(&EventFilter {
                search: Some("  "),
                ..EventFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(blank.len(), 3);
    }

    #[tokio::test]
    async fn unknown_host_is_rejected() {
        let store = test_store().await;
        let skill = store.upsert_skills(&["Guitar".into()]).await.unwrap().remove(0);
        let result = store
            .create_event(&NewEvent {
                host_id: "usr-nope",
                skill_id: &skill.id,
                event_type: EventType::Teach,
                level: SkillLevel::Beginner,
                description: "x",
                scheduled_at: Utc::now(),
                duration_minutes: 30,
            })
            .await;
        assert!(result.is_err());
    }
}
