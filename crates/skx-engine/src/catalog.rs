//! Skill catalog: onboarding and skill-set editing.
//!
//! Skills are referenced by name at the edges and by ID everywhere else. The
//! catalog turns names into IDs through the repository's batch
//! upsert-by-name, so the first reference to a name creates it.

use skx_core::entities::{Skill, User};
use skx_core::repository::Repository;

use crate::{EngineError, EngineResult, SkillExchange};

/// Trim names, drop blanks, and collapse duplicates, keeping first-seen order.
///
/// Matching stays case-sensitive: `"guitar"` and `"Guitar"` are two skills.
#[must_use]
pub fn normalize_skill_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if !name.is_empty() && !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

impl<R: Repository> SkillExchange<R> {
    /// Onboard a user with empty skill sets.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for a blank name, `StorageFailure` otherwise.
    pub async fn create_user(&self, name: &str, location: Option<&str>) -> EngineResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::invalid_request("user name must not be empty"));
        }
        let location = location.map(str::trim).filter(|l| !l.is_empty());

        let user = self.repo.create_user(name, location).await?;
        tracing::info!(user_id = %user.id, "user onboarded");
        Ok(user)
    }

    /// # Errors
    ///
    /// `NotFound` if the user does not exist.
    pub async fn get_user(&self, user_id: &str) -> EngineResult<User> {
        self.require_user(user_id).await
    }

    /// Resolve skill names to catalog entries, creating unknown names.
    ///
    /// # Errors
    ///
    /// `StorageFailure` if the catalog cannot be read or written.
    pub async fn resolve_skills(&self, names: &[String]) -> EngineResult<Vec<Skill>> {
        let names = normalize_skill_names(names);
        if names.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.repo.find_skills_by_name(&names).await?)
    }

    /// Replace a user's `teaches` and `learns` sets with the named skills.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist.
    pub async fn update_user_skills(
        &self,
        user_id: &str,
        teaches: &[String],
        learns: &[String],
    ) -> EngineResult<User> {
        self.require_user(user_id).await?;

        let teach_ids: Vec<String> = self
            .resolve_skills(teaches)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();
        let learn_ids: Vec<String> = self
            .resolve_skills(learns)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        let user = self
            .repo
            .set_user_skills(user_id, &teach_ids, &learn_ids)
            .await?;
        tracing::info!(
            user_id,
            teaches = user.teaches.len(),
            learns = user.learns.len(),
            "skills updated"
        );
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::test_support::helpers::test_engine;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_trims_and_dedupes() {
        let names = vec![
            " Guitar ".to_string(),
            String::new(),
            "Guitar".to_string(),
            "   ".to_string(),
            "guitar".to_string(),
        ];
        assert_eq!(normalize_skill_names(&names), vec!["Guitar", "guitar"]);
    }

    #[tokio::test]
    async fn create_user_rejects_blank_name() {
        let engine = test_engine().await;
        let err = engine.create_user("  ", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[tokio::test]
    async fn create_user_trims_fields() {
        let engine = test_engine().await;
        let user = engine.create_user(" Ada ", Some("  ")).await.unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.location, None);
    }

    #[tokio::test]
    async fn update_user_skills_shares_catalog_entries() {
        let engine = test_engine().await;
        let ada = engine.create_user("Ada", None).await.unwrap();
        let bo = engine.create_user("Bo", None).await.unwrap();

        let ada = engine
            .update_user_skills(&ada.id, &["Guitar".into()], &["Spanish".into()])
            .await
            .unwrap();
        let bo = engine
            .update_user_skills(&bo.id, &["Spanish".into()], &["Guitar".into(), "Guitar ".into()])
            .await
            .unwrap();

        assert_eq!(ada.teaches, bo.learns);
        assert_eq!(ada.learns, bo.teaches);
    }

    #[tokio::test]
    async fn update_skills_for_unknown_user() {
        let engine = test_engine().await;
        let err = engine
            .update_user_skills("usr-nope", &["Guitar".into()], &[])
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { ref id, .. } if id == "usr-nope"));
    }

    #[tokio::test]
    async fn resolve_empty_names_touches_nothing() {
        let engine = test_engine().await;
        let skills = engine.resolve_skills(&[" ".into()]).await.unwrap();
        assert!(skills.is_empty());
    }
}
