//! Token reward ledger.
//!
//! Append-only. One reward per session, created atomically by the
//! repository; issuing again for the same session returns the stored row
//! untouched, whatever amount the caller would compute now.

use skx_core::entities::TokenReward;
use skx_core::enums::ResolutionOutcome;
use skx_core::repository::{FindOrCreate, NewTokenReward, Repository};

use crate::{EngineError, EngineResult, SkillExchange};

impl<R: Repository> SkillExchange<R> {
    /// Grant the teacher `duration_minutes` worth of tokens for a session.
    ///
    /// `created` is false when the session already had a reward.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` for a blank session or teacher id, or when the
    ///   session is registered with a different teacher or duration
    /// - `RewardDeclined` when the session resolved as declined
    pub async fn issue_reward(
        &self,
        session_id: &str,
        teacher_id: &str,
        duration_minutes: u32,
    ) -> EngineResult<FindOrCreate<TokenReward>> {
        if session_id.trim().is_empty() || teacher_id.trim().is_empty() {
            return Err(EngineError::invalid_request(
                "session and teacher ids must not be empty",
            ));
        }

        if let Some(resolution) = self.repo.find_session_resolution(session_id).await?
            && resolution.outcome == ResolutionOutcome::Declined
        {
            tracing::warn!(session_id, teacher_id, "reward refused for declined session");
            return Err(EngineError::RewardDeclined {
                session_id: session_id.to_string(),
            });
        }
        if let Some(session) = self.repo.find_session(session_id).await?
            && (session.teacher_id != teacher_id || session.duration_minutes != duration_minutes)
        {
            return Err(EngineError::invalid_request(format!(
                "reward for session {session_id} does not match its registered teacher and duration"
            )));
        }

        if let Some(existing) = self.repo.find_token_reward_by_session(session_id).await? {
            tracing::debug!(session_id, reward_id = %existing.id, "reward already issued");
            return Ok(FindOrCreate::existing(existing));
        }

        let amount = self.reward.amount_for(duration_minutes);
        let issued = self
            .repo
            .create_token_reward(&NewTokenReward {
                session_id,
                recipient_id: teacher_id,
                amount,
                duration_minutes,
            })
            .await?;
        if issued.created {
            tracing::info!(
                session_id,
                teacher_id,
                amount,
                rate = self.reward.rate,
                unit = %self.reward.unit,
                "reward issued"
            );
        } else {
            tracing::debug!(session_id, "reward issued concurrently");
        }
        Ok(issued)
    }

    /// Rewards received by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist.
    pub async fn list_rewards(&self, user_id: &str) -> EngineResult<Vec<TokenReward>> {
        self.require_user(user_id).await?;
        Ok(self.repo.list_token_rewards_for_recipient(user_id).await?)
    }

    /// Total tokens `user_id` has earned.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist.
    pub async fn token_balance(&self, user_id: &str) -> EngineResult<i64> {
        Ok(self
            .list_rewards(user_id)
            .await?
            .iter()
            .map(|r| r.amount)
            .sum())
    }
}
