//! Per-user session history and profile stats.

use skx_core::entities::{HistoryEntry, UserStats};
use skx_core::enums::ConnectionStatus;
use skx_core::repository::Repository;

use crate::{EngineResult, SkillExchange};

impl<R: Repository> SkillExchange<R> {
    /// Reviews written by `user_id` and rewards they received, newest first.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist.
    pub async fn session_history(&self, user_id: &str) -> EngineResult<Vec<HistoryEntry>> {
        self.require_user(user_id).await?;
        let reviews = self.repo.list_reviews_by_reviewer(user_id).await?;
        let rewards = self.repo.list_token_rewards_for_recipient(user_id).await?;

        let mut entries: Vec<HistoryEntry> = reviews
            .into_iter()
            .map(HistoryEntry::Review)
            .chain(rewards.into_iter().map(HistoryEntry::Reward))
            .collect();
        entries.sort_by_key(|e| std::cmp::Reverse(e.timestamp()));
        Ok(entries)
    }

    /// Skill counts, accepted connections, and tokens earned.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist.
    pub async fn user_stats(&self, user_id: &str) -> EngineResult<UserStats> {
        let user = self.require_user(user_id).await?;
        let active = self
            .repo
            .list_connections_for_user(user_id, Some(ConnectionStatus::Accepted))
            .await?;
        let total_tokens = self
            .repo
            .list_token_rewards_for_recipient(user_id)
            .await?
            .iter()
            .map(|r| r.amount)
            .sum();

        Ok(UserStats {
            user_id: user.id,
            skills_taught: u32::try_from(user.teaches.len()).unwrap_or(u32::MAX),
            skills_learned: u32::try_from(user.learns.len()).unwrap_or(u32::MAX),
            active_connections: u32::try_from(active.len()).unwrap_or(u32::MAX),
            total_tokens,
        })
    }
}
