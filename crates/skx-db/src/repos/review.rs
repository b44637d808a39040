//! Review repository — one review per (session, reviewer), with ordered
//! per-skill evaluations.

use skx_core::entities::{Review, SkillEvaluation};
use skx_core::ids::PREFIX_REVIEW;
use skx_core::repository::{NewReview, ReviewWrite};

use crate::error::DatabaseError;
use crate::helpers::{collect_rows, fmt_datetime, get_narrow, get_opt_string, now, parse_datetime};
use crate::store::SkxStore;

const SELECT_COLS: &str = "id, session_id, reviewer_id, rating, feedback, created_at, updated_at";

/// Parse a review row without its evaluations.
fn row_to_review(row: &libsql::Row) -> Result<Review, DatabaseError> {
    Ok(Review {
        id: row.get(0)?,
        session_id: row.get(1)?,
        reviewer_id: row.get(2)?,
        rating: get_narrow(row, 3)?,
        feedback: get_opt_string(row, 4)?,
        skill_evaluations: Vec::new(),
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn row_to_evaluation(row: &libsql::Row) -> Result<SkillEvaluation, DatabaseError> {
    Ok(SkillEvaluation {
        skill_id: row.get(0)?,
        rating: get_narrow(row, 1)?,
        feedback: get_opt_string(row, 2)?,
    })
}

impl SkxStore {
    async fn load_evaluations(&self, review: &mut Review) -> Result<(), DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                "SELECT skill_id, rating, feedback FROM skill_evaluations
                 WHERE review_id = ?1 ORDER BY position",
                [review.id.as_str()],
            )
            .await?;
        review.skill_evaluations = collect_rows(rows, row_to_evaluation).await?;
        Ok(())
    }

    async fn collect_reviews(&self, rows: libsql::Rows) -> Result<Vec<Review>, DatabaseError> {
        let mut reviews = collect_rows(rows, row_to_review).await?;
        for review in &mut reviews {
            self.load_evaluations(review).await?;
        }
        Ok(reviews)
    }

    pub async fn find_review(
        &self,
        session_id: &str,
        reviewer_id: &str,
    ) -> Result<Option<Review>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM reviews WHERE session_id = ?1 AND reviewer_id = ?2"
                ),
                libsql::params![session_id, reviewer_id],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let mut review = row_to_review(&row)?;
        self.load_evaluations(&mut review).await?;
        Ok(Some(review))
    }

    /// Insert the review for `(session_id, reviewer_id)`, or overwrite the
    /// existing one in place (same id, same `created_at`).
    ///
    /// Evaluations are replaced wholesale in the same transaction.
    pub async fn create_review(&self, new: &NewReview<'_>) -> Result<ReviewWrite, DatabaseError> {
        let _gate = self.write_gate().await;
        let replaced = self.find_review(new.session_id, new.reviewer_id).await?;
        let now = now();
        let (id, created_at) = match &replaced {
            Some(previous) => (previous.id.clone(), previous.created_at),
            None => (self.db().generate_id(PREFIX_REVIEW).await?, now),
        };

        let tx = self.db().conn().transaction().await?;
        tx.execute(
            &format!(
                "INSERT INTO reviews ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(session_id, reviewer_id) DO UPDATE SET
                     rating = excluded.rating,
                     feedback = excluded.feedback,
                     updated_at = excluded.updated_at"
            ),
            libsql::params![
                id.as_str(),
                new.session_id,
                new.reviewer_id,
                i64::from(new.rating),
                new.feedback,
                fmt_datetime(&created_at),
                fmt_datetime(&now)
            ],
        )
        .await?;
        tx.execute(
            "DELETE FROM skill_evaluations WHERE review_id = ?1",
            [id.as_str()],
        )
        .await?;
        for (position, eval) in (0_i64..).zip(new.skill_evaluations) {
            tx.execute(
                "INSERT INTO skill_evaluations (review_id, position, skill_id, rating, feedback)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    position,
                    eval.skill_id.as_str(),
                    i64::from(eval.rating),
                    eval.feedback.as_deref()
                ],
            )
            .await?;
        }
        tx.commit().await?;

        let review = Review {
            id,
            session_id: new.session_id.to_string(),
            reviewer_id: new.reviewer_id.to_string(),
            rating: new.rating,
            feedback: new.feedback.map(String::from),
            skill_evaluations: new.skill_evaluations.to_vec(),
            created_at,
            updated_at: now,
        };
        tracing::debug!(
            review_id = %review.id,
            session_id = new.session_id,
            replaced = replaced.is_some(),
            "review stored"
        );
        Ok(ReviewWrite { review, replaced })
    }

    /// All reviews of a session, in submission order.
    pub async fn find_reviews_by_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<Review>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM reviews WHERE session_id = ?1
                     ORDER BY created_at, rowid"
                ),
                [session_id],
            )
            .await?;
        self.collect_reviews(rows).await
    }

    /// Reviews written by `reviewer_id`, most recently updated first.
    pub async fn list_reviews_by_reviewer(
        &self,
        reviewer_id: &str,
    ) -> Result<Vec<Review>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM reviews WHERE reviewer_id = ?1
                     ORDER BY updated_at DESC, rowid DESC"
                ),
                [reviewer_id],
            )
            .await?;
        self.collect_reviews(rows).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{test_store, two_users};
    use pretty_assertions::assert_eq;

    fn eval(skill_id: &str, rating: u8) -> SkillEvaluation {
        SkillEvaluation {
            skill_id: skill_id.to_string(),
            rating,
            feedback: None,
        }
    }

    #[tokio::test]
    async fn create_review_roundtrip() {
        let store = test_store().await;
        let (a, _) = two_users(&store).await;
        let skills = store
            .upsert_skills(&["Guitar".into(), "Spanish".into()])
            .await
            .unwrap();
        let evals = vec![eval(&skills[1].id, 5), eval(&skills[0].id, 3)];

        let write = store
            .create_review(&NewReview {
                session_id: "ses-1",
                reviewer_id: &a,
                rating: 4,
                feedback: Some("great"),
                skill_evaluations: &evals,
            })
            .await
            .unwrap();
        assert!(write.replaced.is_none());
        assert!(write.review.id.starts_with("rev-"));

        let stored = store.find_reviews_by_session("ses-1").await.unwrap();
        assert_eq!(stored, vec![write.review]);
        assert_eq!(stored[0].skill_evaluations, evals);
    }

    #[tokio::test]
    async fn resubmission_overwrites_in_place() {
        let store = test_store().await;
        let (a, _) = two_users(&store).await;
        let guitar = store.upsert_skills(&["Guitar".into()]).await.unwrap()[0].id.clone();

        let first = store
            .create_review(&NewReview {
                session_id: "ses-1",
                reviewer_id: &a,
                rating: 2,
                feedback: None,
                skill_evaluations: &[eval(&guitar, 2)],
            })
            .await
            .unwrap();
        let second = store
            .create_review(&NewReview {
                session_id: "ses-1",
                reviewer_id: &a,
                rating: 5,
                feedback: Some("better on reflection"),
                skill_evaluations: &[],
            })
            .await
            .unwrap();

        assert_eq!(second.review.id, first.review.id);
        assert_eq!(second.review.created_at, first.review.created_at);
        assert_eq!(second.replaced, Some(first.review));

        let stored = store.find_reviews_by_session("ses-1").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].rating, 5);
        assert!(stored[0].skill_evaluations.is_empty());
        assert!(store.skill_ratings(&guitar).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_skill_is_rejected_atomically() {
        let store = test_store().await;
        let (a, _) = two_users(&store).await;

        let result = store
            .create_review(&NewReview {
                session_id: "ses-1",
                reviewer_id: &a,
                rating: 4,
                feedback: None,
                skill_evaluations: &[eval("skl-missing", 4)],
            })
            .await;
        assert!(result.is_err());
        assert!(store.find_reviews_by_session("ses-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_by_reviewer_spans_sessions() {
        let store = test_store().await;
        let (a, b) = two_users(&store).await;
        for (session, reviewer) in [("ses-1", &a), ("ses-2", &a), ("ses-2", &b)] {
            store
                .create_review(&NewReview {
                    session_id: session,
                    reviewer_id: reviewer,
                    rating: 4,
                    feedback: None,
                    skill_evaluations: &[],
                })
                .await
                .unwrap();
        }

        let by_a = store.list_reviews_by_reviewer(&a).await.unwrap();
        assert_eq!(by_a.len(), 2);
        assert!(by_a.iter().all(|r| r.reviewer_id == a));
        assert_eq!(store.find_reviews_by_session("ses-2").await.unwrap().len(), 2);
    }
}
