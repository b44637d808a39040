//! Session resolution repository. A session is resolved exactly once.

use skx_core::entities::SessionResolution;
use skx_core::repository::FindOrCreate;

use crate::error::DatabaseError;
use crate::helpers::{fmt_datetime, get_narrow, parse_datetime, parse_enum};
use crate::store::SkxStore;

const SELECT_COLS: &str = "session_id, teacher_id, learner_id, duration_minutes, \
     average_rating, review_count, outcome, resolved_at";

fn row_to_resolution(row: &libsql::Row) -> Result<SessionResolution, DatabaseError> {
    Ok(SessionResolution {
        session_id: row.get(0)?,
        teacher_id: row.get(1)?,
        learner_id: row.get(2)?,
        duration_minutes: get_narrow(row, 3)?,
        average_rating: row.get::<f64>(4)?,
        review_count: get_narrow(row, 5)?,
        outcome: parse_enum(&row.get::<String>(6)?)?,
        resolved_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl SkxStore {
    pub async fn find_session_resolution(
        &self,
        session_id: &str,
    ) -> Result<Option<SessionResolution>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM session_resolutions WHERE session_id = ?1"),
                [session_id],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_resolution).transpose()
    }

    /// Record the resolution unless the session already has one. The stored
    /// row is always returned, so a losing caller sees the winner's outcome.
    pub async fn record_session_resolution(
        &self,
        resolution: &SessionResolution,
    ) -> Result<FindOrCreate<SessionResolution>, DatabaseError> {
        let inserted = {
            let _gate = self.write_gate().await;
            self.db()
                .conn()
                .execute(
                    &format!(
                        "INSERT OR IGNORE INTO session_resolutions ({SELECT_COLS})
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                    ),
                    libsql::params![
                        resolution.session_id.as_str(),
                        resolution.teacher_id.as_str(),
                        resolution.learner_id.as_str(),
                        i64::from(resolution.duration_minutes),
                        resolution.average_rating,
                        i64::from(resolution.review_count),
                        resolution.outcome.as_str(),
                        fmt_datetime(&resolution.resolved_at)
                    ],
                )
                .await?
        };

        let stored = self
            .find_session_resolution(&resolution.session_id)
            .await?
            .ok_or(DatabaseError::NoResult)?;
        Ok(if inserted > 0 {
            FindOrCreate::created(stored)
        } else {
            FindOrCreate::existing(stored)
        })
    }
}
