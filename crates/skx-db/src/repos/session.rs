//! Session repository — descriptors registered once by the first review.

use std::collections::BTreeSet;

use skx_core::entities::Session;
use skx_core::repository::FindOrCreate;

use crate::error::DatabaseError;
use crate::helpers::{collect_rows, fmt_datetime, get_narrow, now};
use crate::store::SkxStore;

fn row_to_session(row: &libsql::Row) -> Result<Session, DatabaseError> {
    Ok(Session {
        id: row.get(0)?,
        teacher_id: row.get(1)?,
        learner_id: row.get(2)?,
        duration_minutes: get_narrow(row, 3)?,
        skill_ids: BTreeSet::new(),
    })
}

impl SkxStore {
    /// Store `session` unless a descriptor with its ID exists.
    ///
    /// The descriptor row and its skill rows are written in one transaction.
    /// An existing descriptor is never modified.
    pub async fn register_session(
        &self,
        session: &Session,
    ) -> Result<FindOrCreate<Session>, DatabaseError> {
        let inserted = {
            let _gate = self.write_gate().await;
            let tx = self.db().conn().transaction().await?;
            let inserted = tx
                .execute(
                    "INSERT INTO sessions (id, teacher_id, learner_id, duration_minutes, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(id) DO NOTHING",
                    libsql::params![
                        session.id.as_str(),
                        session.teacher_id.as_str(),
                        session.learner_id.as_str(),
                        i64::from(session.duration_minutes),
                        fmt_datetime(&now())
                    ],
                )
                .await?;
            if inserted > 0 {
                for skill_id in &session.skill_ids {
                    tx.execute(
                        "INSERT INTO session_skills (session_id, skill_id) VALUES (?1, ?2)",
                        libsql::params![session.id.as_str(), skill_id.as_str()],
                    )
                    .await?;
                }
            }
            tx.commit().await?;
            inserted
        };

        let stored = self
            .find_session(&session.id)
            .await?
            .ok_or(DatabaseError::NoResult)?;
        if inserted > 0 {
            tracing::debug!(
                session_id = %stored.id,
                teacher_id = %stored.teacher_id,
                skills = stored.skill_ids.len(),
                "session registered"
            );
            Ok(FindOrCreate::created(stored))
        } else {
            Ok(FindOrCreate::existing(stored))
        }
    }

    pub async fn find_session(&self, session_id: &str) -> Result<Option<Session>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, teacher_id, learner_id, duration_minutes FROM sessions WHERE id = ?1",
                [session_id],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let mut session = row_to_session(&row)?;

        let rows = self
            .db()
            .conn()
            .query(
                "SELECT skill_id FROM session_skills WHERE session_id = ?1",
                [session_id],
            )
            .await?;
        session.skill_ids = collect_rows(rows, |row| Ok(row.get::<String>(0)?))
            .await?
            .into_iter()
            .collect();
        Ok(Some(session))
    }
}
