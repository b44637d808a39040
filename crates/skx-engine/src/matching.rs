//! Bidirectional skill matching.
//!
//! A candidate scores one point per skill the current user can teach them
//! and one point per skill they can teach the current user:
//!
//! ```text
//! teaching_matches = |candidate.learns ∩ current.teaches|
//! learning_matches = |candidate.teaches ∩ current.learns|
//! score            = teaching_matches + learning_matches
//! ```
//!
//! The score is symmetric: `teaching(A, B) == learning(B, A)`.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use skx_core::entities::User;
use skx_core::repository::Repository;

use crate::{EngineResult, SkillExchange};

/// Compatibility of one candidate with the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchScore {
    pub candidate_id: String,
    /// False for the current user themself or anyone already connected.
    pub eligible: bool,
    pub teaching_matches: u32,
    pub learning_matches: u32,
    pub score: u32,
}

/// A ranked candidate with their profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedMatch {
    pub candidate: User,
    #[serde(flatten)]
    pub score: MatchScore,
}

fn overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> u32 {
    u32::try_from(a.intersection(b).count()).unwrap_or(u32::MAX)
}

/// Score `candidate` against `current`. Pure; empty sets score 0.
#[must_use]
pub fn score_candidate(current: &User, candidate: &User, connected: bool) -> MatchScore {
    let teaching_matches = overlap(&candidate.learns, &current.teaches);
    let learning_matches = overlap(&candidate.teaches, &current.learns);
    MatchScore {
        candidate_id: candidate.id.clone(),
        eligible: !connected && candidate.id != current.id,
        teaching_matches,
        learning_matches,
        score: teaching_matches.saturating_add(learning_matches),
    }
}

/// Score every candidate, keep the eligible ones, and sort by score,
/// highest first. Ties keep their input order.
#[must_use]
pub fn rank_matches<'a>(
    current: &User,
    candidates: &'a [User],
    connected: &HashSet<&str>,
) -> Vec<(&'a User, MatchScore)> {
    let mut ranked: Vec<_> = candidates
        .iter()
        .map(|c| (c, score_candidate(current, c, connected.contains(c.id.as_str()))))
        .filter(|(_, s)| s.eligible)
        .collect();
    ranked.sort_by(|(_, a), (_, b)| b.score.cmp(&a.score));
    ranked
}

impl<R: Repository> SkillExchange<R> {
    /// Rank every other user for `user_id`.
    ///
    /// Candidates already connected in either direction (any status) are
    /// excluded, as are scores below `matching.min_score`. `limit` defaults
    /// to `matching.default_limit`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist.
    pub async fn find_matches(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> EngineResult<Vec<RankedMatch>> {
        let current = self.require_user(user_id).await?;
        let users = self.repo.list_users().await?;
        let connections = self.repo.list_connections_for_user(user_id, None).await?;
        let connected: HashSet<&str> = connections
            .iter()
            .filter_map(|c| c.counterpart(user_id))
            .collect();

        let limit = usize::try_from(limit.unwrap_or(self.matching.default_limit))
            .unwrap_or(usize::MAX);
        let matches: Vec<RankedMatch> = rank_matches(&current, &users, &connected)
            .into_iter()
            .filter(|(_, s)| s.score >= self.matching.min_score)
            .take(limit)
            .map(|(candidate, score)| RankedMatch {
                candidate: candidate.clone(),
                score,
            })
            .collect();

        tracing::debug!(
            user_id,
            candidates = users.len().saturating_sub(1),
            returned = matches.len(),
            "matches ranked"
        );
        Ok(matches)
    }
}
