//! Skill catalog repository — upsert-by-name and rating aggregates.

use skx_core::entities::Skill;
use skx_core::ids::PREFIX_SKILL;

use crate::error::DatabaseError;
use crate::helpers::{collect_rows, fmt_datetime, get_narrow, now, parse_datetime};
use crate::store::SkxStore;

const SELECT_COLS: &str = "id, name, average_rating, rating_count, created_at, updated_at";

fn row_to_skill(row: &libsql::Row) -> Result<Skill, DatabaseError> {
    Ok(Skill {
        id: row.get(0)?,
        name: row.get(1)?,
        average_rating: row.get::<f64>(2)?,
        rating_count: get_narrow(row, 3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl SkxStore {
    /// Return a skill for every name, creating the missing ones.
    ///
    /// Names match exactly (case-sensitive). The result follows the order of
    /// first appearance in `names`, without duplicates.
    pub async fn upsert_skills(&self, names: &[String]) -> Result<Vec<Skill>, DatabaseError> {
        let mut distinct: Vec<&str> = Vec::with_capacity(names.len());
        for name in names {
            if !distinct.contains(&name.as_str()) {
                distinct.push(name);
            }
        }

        {
            let _gate = self.write_gate().await;
            let now = fmt_datetime(&now());
            for name in &distinct {
                let id = self.db().generate_id(PREFIX_SKILL).await?;
                self.db()
                    .conn()
                    .execute(
                        "INSERT OR IGNORE INTO skills (id, name, created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4)",
                        libsql::params![id.as_str(), *name, now.as_str(), now.as_str()],
                    )
                    .await?;
            }
        }

        let mut skills = Vec::with_capacity(distinct.len());
        for name in distinct {
            let skill = self.find_skill_by_name(name).await?.ok_or_else(|| {
                DatabaseError::InvalidState(format!("skill '{name}' missing after upsert"))
            })?;
            skills.push(skill);
        }
        Ok(skills)
    }

    pub async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM skills WHERE name = ?1"),
                [name],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_skill).transpose()
    }

    pub async fn find_skill(&self, id: &str) -> Result<Option<Skill>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM skills WHERE id = ?1"), [id])
            .await?;
        rows.next().await?.as_ref().map(row_to_skill).transpose()
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM skills ORDER BY name"), ())
            .await?;
        collect_rows(rows, row_to_skill).await
    }

    /// Every per-skill rating recorded for `skill_id`, across all reviews.
    pub async fn skill_ratings(&self, skill_id: &str) -> Result<Vec<u8>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                "SELECT rating FROM skill_evaluations WHERE skill_id = ?1",
                [skill_id],
            )
            .await?;
        collect_rows(rows, |row| get_narrow::<u8>(row, 0)).await
    }

    pub async fn update_skill_aggregate(
        &self,
        skill_id: &str,
        average_rating: f64,
        rating_count: u32,
    ) -> Result<(), DatabaseError> {
        let _gate = self.write_gate().await;
        let updated = self
            .db()
            .conn()
            .execute(
                "UPDATE skills SET average_rating = ?1, rating_count = ?2, updated_at = ?3
                 WHERE id = ?4",
                libsql::params![
                    average_rating,
                    i64::from(rating_count),
                    fmt_datetime(&now()),
                    skill_id
                ],
            )
            .await?;
        if updated == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }
}
