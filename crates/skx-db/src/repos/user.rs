//! User repository — onboarding, lookup, and skill-set replacement.

use std::collections::{BTreeSet, HashMap};

use skx_core::entities::User;
use skx_core::enums::SkillRole;
use skx_core::ids::PREFIX_USER;

use crate::error::DatabaseError;
use crate::helpers::{collect_rows, fmt_datetime, get_opt_string, now, parse_datetime, parse_enum};
use crate::store::SkxStore;

const SELECT_COLS: &str = "id, name, location, created_at, updated_at";

/// Parse a user row without its skill sets.
fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        location: get_opt_string(row, 2)?,
        teaches: BTreeSet::new(),
        learns: BTreeSet::new(),
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn row_to_membership(row: &libsql::Row) -> Result<(String, String, SkillRole), DatabaseError> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        parse_enum(&row.get::<String>(2)?)?,
    ))
}

fn attach_skill(user: &mut User, skill_id: String, role: SkillRole) {
    match role {
        SkillRole::Teaches => user.teaches.insert(skill_id),
        SkillRole::Learns => user.learns.insert(skill_id),
    };
}

impl SkxStore {
    pub async fn create_user(
        &self,
        name: &str,
        location: Option<&str>,
    ) -> Result<User, DatabaseError> {
        let _gate = self.write_gate().await;
        let now = now();
        let id = self.db().generate_id(PREFIX_USER).await?;

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO users ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
                libsql::params![
                    id.as_str(),
                    name,
                    location,
                    fmt_datetime(&now),
                    fmt_datetime(&now)
                ],
            )
            .await?;

        tracing::debug!(user_id = %id, "user created");
        Ok(User {
            id,
            name: name.to_string(),
            location: location.map(String::from),
            teaches: BTreeSet::new(),
            learns: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn find_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let mut user = row_to_user(&row)?;

        let rows = self
            .db()
            .conn()
            .query(
                "SELECT user_id, skill_id, role FROM user_skills WHERE user_id = ?1",
                [id],
            )
            .await?;
        for (_, skill_id, role) in collect_rows(rows, row_to_membership).await? {
            attach_skill(&mut user, skill_id, role);
        }
        Ok(Some(user))
    }

    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        self.find_user(id).await?.ok_or(DatabaseError::NoResult)
    }

    /// All users with their skill sets, oldest first.
    pub async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users ORDER BY created_at, rowid"),
                (),
            )
            .await?;
        let mut users = collect_rows(rows, row_to_user).await?;

        let rows = self
            .db()
            .conn()
            .query("SELECT user_id, skill_id, role FROM user_skills", ())
            .await?;
        let index: HashMap<String, usize> = users
            .iter()
            .enumerate()
            .map(|(i, u)| (u.id.clone(), i))
            .collect();
        for (user_id, skill_id, role) in collect_rows(rows, row_to_membership).await? {
            if let Some(&i) = index.get(&user_id) {
                attach_skill(&mut users[i], skill_id, role);
            }
        }
        Ok(users)
    }

    /// Replace both skill sets atomically. Duplicate IDs collapse.
    pub async fn set_user_skills(
        &self,
        user_id: &str,
        teaches: &[String],
        learns: &[String],
    ) -> Result<User, DatabaseError> {
        {
            let _gate = self.write_gate().await;
            let now = now();
            let tx = self.db().conn().transaction().await?;

            let updated = tx
                .execute(
                    "UPDATE users SET updated_at = ?1 WHERE id = ?2",
                    libsql::params![fmt_datetime(&now), user_id],
                )
                .await?;
            if updated == 0 {
                tx.rollback().await?;
                return Err(DatabaseError::NoResult);
            }

            tx.execute("DELETE FROM user_skills WHERE user_id = ?1", [user_id])
                .await?;
            for (role, ids) in [(SkillRole::Teaches, teaches), (SkillRole::Learns, learns)] {
                for skill_id in ids {
                    tx.execute(
                        "INSERT OR IGNORE INTO user_skills (user_id, skill_id, role) VALUES (?1, ?2, ?3)",
                        libsql::params![user_id, skill_id.as_str(), role.as_str()],
                    )
                    .await?;
                }
            }
            tx.commit().await?;
        }

        self.get_user(user_id).await
    }
}
