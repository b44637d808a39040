//! Two-party review consensus.
//!
//! A session resolves once two distinct participants have reviewed it. The
//! mean of the recorded ratings decides the outcome against
//! `reward.threshold`, and the outcome is recorded exactly once: a declined
//! session stays declined, and later submissions never re-trigger it.
//!
//! The first accepted review registers the session descriptor. Later
//! submissions must present the same descriptor, so the participants, the
//! duration and the covered skills cannot be rewritten by a caller.
//!
//! A reviewer who submits again overwrites their earlier review for that
//! session. Before resolution this changes the eventual mean; after
//! resolution it only updates skill aggregates.
//!
//! Every submission recomputes the aggregates of each skill it touches from
//! the full evaluation history of that skill. Concurrent recomputes are last
//! writer wins.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use skx_core::entities::{Review, Session, SessionResolution, SkillEvaluation, TokenReward};
use skx_core::enums::{EntityType, ResolutionOutcome};
use skx_core::repository::{NewReview, Repository};

use crate::{EngineError, EngineResult, SkillExchange};

/// Reviews needed, from distinct reviewers, before a session resolves.
pub const REQUIRED_REVIEWERS: usize = 2;

const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Where a session stands after a review submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Consensus {
    /// Fewer than two reviewers so far; no reward decision yet.
    Pending { review_count: u32 },
    /// The session is resolved. `newly_resolved` is true only for the call
    /// that recorded the resolution.
    Resolved {
        resolution: SessionResolution,
        reward: Option<TokenReward>,
        newly_resolved: bool,
    },
}

/// Result of `SkillExchange::submit_review`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSubmission {
    pub review: Review,
    /// True when this submission overwrote the reviewer's earlier review.
    pub replaced: bool,
    pub consensus: Consensus,
}

/// Read-only view of a session's review state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    pub session_id: String,
    /// The registered descriptor, once any review was accepted.
    pub session: Option<Session>,
    pub reviews: Vec<Review>,
    pub average_rating: Option<f64>,
    pub both_reviewed: bool,
    pub resolution: Option<SessionResolution>,
    pub reward: Option<TokenReward>,
}

/// Arithmetic mean, `None` for no ratings.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_rating(ratings: impl IntoIterator<Item = u8>) -> Option<f64> {
    let (sum, count) = ratings
        .into_iter()
        .fold((0_u64, 0_u32), |(sum, count), r| (sum + u64::from(r), count + 1));
    (count > 0).then(|| sum as f64 / f64::from(count))
}

fn distinct_reviewers(reviews: &[Review]) -> usize {
    reviews
        .iter()
        .map(|r| r.reviewer_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

fn validate_ratings(rating: u8, evaluations: &[SkillEvaluation]) -> EngineResult<()> {
    if !RATING_RANGE.contains(&rating) {
        return Err(EngineError::InvalidRating {
            rating,
            skill_id: None,
        });
    }
    for eval in evaluations {
        if !RATING_RANGE.contains(&eval.rating) {
            return Err(EngineError::InvalidRating {
                rating: eval.rating,
                skill_id: Some(eval.skill_id.clone()),
            });
        }
    }
    Ok(())
}

impl<R: Repository> SkillExchange<R> {
    /// Record `reviewer_id`'s review of `session` and evaluate consensus.
    ///
    /// When the session is (or becomes) resolved with a rewarded outcome, the
    /// teacher's reward is issued idempotently on every call, so a retry after
    /// a partial failure completes the issuance.
    ///
    /// # Errors
    ///
    /// - `InvalidRating` for an overall or per-skill rating outside 1..=5
    /// - `InvalidRequest` if the session's teacher and learner are the same
    ///   user, an evaluation names a skill the session did not cover, or the
    ///   descriptor differs from the one registered for `session.id`
    /// - `Forbidden` unless `reviewer_id` is the session's teacher or learner
    /// - `NotFound` for an unknown participant or covered skill
    pub async fn submit_review(
        &self,
        session: &Session,
        reviewer_id: &str,
        rating: u8,
        feedback: Option<&str>,
        evaluations: &[SkillEvaluation],
    ) -> EngineResult<ReviewSubmission> {
        validate_ratings(rating, evaluations)?;
        if session.id.trim().is_empty() {
            return Err(EngineError::invalid_request("session id must not be empty"));
        }
        if session.teacher_id == session.learner_id {
            return Err(EngineError::invalid_request(
                "session teacher and learner must differ",
            ));
        }
        if !session.is_participant(reviewer_id) {
            return Err(EngineError::forbidden(
                reviewer_id,
                EntityType::Session,
                &session.id,
            ));
        }
        self.require_user(&session.teacher_id).await?;
        self.require_user(&session.learner_id).await?;
        for skill_id in &session.skill_ids {
            if self.repo.find_skill_by_id(skill_id).await?.is_none() {
                return Err(EngineError::not_found(EntityType::Skill, skill_id));
            }
        }
        if let Some(eval) = evaluations.iter().find(|e| !session.covers_skill(&e.skill_id)) {
            return Err(EngineError::invalid_request(format!(
                "skill {} was not covered by session {}",
                eval.skill_id, session.id
            )));
        }
        let session = self.register_session(session).await?;

        let feedback = feedback.map(str::trim).filter(|f| !f.is_empty());
        let write = self
            .repo
            .create_review(&NewReview {
                session_id: &session.id,
                reviewer_id,
                rating,
                feedback,
                skill_evaluations: evaluations,
            })
            .await?;
        tracing::info!(
            session_id = %session.id,
            reviewer_id,
            rating,
            replaced = write.replaced.is_some(),
            "review submitted"
        );

        let touched: BTreeSet<&str> = write
            .review
            .skill_evaluations
            .iter()
            .chain(write.replaced.iter().flat_map(|r| r.skill_evaluations.iter()))
            .map(|e| e.skill_id.as_str())
            .collect();
        for skill_id in touched {
            self.recompute_skill_aggregate(skill_id).await?;
        }

        let consensus = self.evaluate_consensus(&session).await?;
        Ok(ReviewSubmission {
            replaced: write.replaced.is_some(),
            review: write.review,
            consensus,
        })
    }

    /// Reviews, running mean, and resolution of a session.
    ///
    /// # Errors
    ///
    /// `StorageFailure` if the repository cannot be read.
    pub async fn session_status(&self, session_id: &str) -> EngineResult<SessionStatus> {
        let session = self.repo.find_session(session_id).await?;
        let reviews = self.repo.find_reviews_by_session(session_id).await?;
        let resolution = self.repo.find_session_resolution(session_id).await?;
        let reward = self.repo.find_token_reward_by_session(session_id).await?;
        Ok(SessionStatus {
            session_id: session_id.to_string(),
            session,
            average_rating: mean_rating(reviews.iter().map(|r| r.rating)),
            both_reviewed: distinct_reviewers(&reviews) >= REQUIRED_REVIEWERS,
            reviews,
            resolution,
            reward,
        })
    }

    /// Register `session` on first use, or check it against the stored one.
    async fn register_session(&self, session: &Session) -> EngineResult<Session> {
        let registered = self.repo.register_session(session).await?;
        if registered.created {
            tracing::debug!(session_id = %session.id, "session registered");
        } else if registered.value != *session {
            tracing::warn!(
                session_id = %session.id,
                teacher_id = %session.teacher_id,
                "session descriptor does not match the registered one"
            );
            return Err(EngineError::invalid_request(format!(
                "session {} does not match its registered descriptor",
                session.id
            )));
        }
        Ok(registered.value)
    }

    async fn evaluate_consensus(&self, session: &Session) -> EngineResult<Consensus> {
        if let Some(resolution) = self.repo.find_session_resolution(&session.id).await? {
            tracing::debug!(session_id = %session.id, outcome = %resolution.outcome, "session already resolved");
            let reward = self.settle(&resolution).await?;
            return Ok(Consensus::Resolved {
                resolution,
                reward,
                newly_resolved: false,
            });
        }

        let reviews = self.repo.find_reviews_by_session(&session.id).await?;
        let reviewers = distinct_reviewers(&reviews);
        let average = mean_rating(reviews.iter().map(|r| r.rating));
        let Some(average_rating) = average.filter(|_| reviewers >= REQUIRED_REVIEWERS) else {
            return Ok(Consensus::Pending {
                review_count: u32::try_from(reviews.len()).unwrap_or(u32::MAX),
            });
        };

        let outcome = if self.reward.clears_threshold(average_rating) {
            ResolutionOutcome::Rewarded
        } else {
            ResolutionOutcome::Declined
        };
        let recorded = self
            .repo
            .record_session_resolution(&SessionResolution {
                session_id: session.id.clone(),
                teacher_id: session.teacher_id.clone(),
                learner_id: session.learner_id.clone(),
                duration_minutes: session.duration_minutes,
                average_rating,
                review_count: u32::try_from(reviews.len()).unwrap_or(u32::MAX),
                outcome,
                resolved_at: chrono::Utc::now(),
            })
            .await?;

        let resolution = recorded.value;
        if recorded.created {
            tracing::info!(
                session_id = %session.id,
                average_rating,
                outcome = %resolution.outcome,
                "session resolved"
            );
        } else {
            tracing::debug!(session_id = %session.id, "session resolved concurrently");
        }
        let reward = self.settle(&resolution).await?;
        Ok(Consensus::Resolved {
            resolution,
            reward,
            newly_resolved: recorded.created,
        })
    }

    /// Issue (or fetch) the reward a resolution calls for.
    async fn settle(&self, resolution: &SessionResolution) -> EngineResult<Option<TokenReward>> {
        match resolution.outcome {
            ResolutionOutcome::Rewarded => {
                let issued = self
                    .issue_reward(
                        &resolution.session_id,
                        &resolution.teacher_id,
                        resolution.duration_minutes,
                    )
                    .await?;
                Ok(Some(issued.value))
            }
            ResolutionOutcome::Declined => Ok(None),
        }
    }

    async fn recompute_skill_aggregate(&self, skill_id: &str) -> EngineResult<()> {
        let ratings = self.repo.find_skill_ratings(skill_id).await?;
        let count = u32::try_from(ratings.len()).unwrap_or(u32::MAX);
        let average = mean_rating(ratings).unwrap_or(0.0);
        self.repo
            .update_skill_aggregate(skill_id, average, count)
            .await?;
        tracing::debug!(skill_id, average, count, "skill aggregate recomputed");
        Ok(())
    }
}
