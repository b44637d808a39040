//! Token reward ledger. At most one reward per session.

use skx_core::entities::TokenReward;
use skx_core::ids::PREFIX_REWARD;
use skx_core::repository::{FindOrCreate, NewTokenReward};

use crate::error::DatabaseError;
use crate::helpers::{collect_rows, fmt_datetime, get_narrow, now, parse_datetime};
use crate::store::SkxStore;

const SELECT_COLS: &str = "id, session_id, recipient_id, amount, duration_minutes, created_at";

fn row_to_reward(row: &libsql::Row) -> Result<TokenReward, DatabaseError> {
    Ok(TokenReward {
        id: row.get(0)?,
        session_id: row.get(1)?,
        recipient_id: row.get(2)?,
        amount: row.get::<i64>(3)?,
        duration_minutes: get_narrow(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl SkxStore {
    pub async fn find_token_reward_by_session(
        &self,
        session_id: &str,
    ) -> Result<Option<TokenReward>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM token_rewards WHERE session_id = ?1"),
                [session_id],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_reward).transpose()
    }

    /// Issue the reward for a session unless one was already issued.
    pub async fn create_token_reward(
        &self,
        new: &NewTokenReward<'_>,
    ) -> Result<FindOrCreate<TokenReward>, DatabaseError> {
        let inserted = {
            let _gate = self.write_gate().await;
            let id = self.db().generate_id(PREFIX_REWARD).await?;
            self.db()
                .conn()
                .execute(
                    &format!(
                        "INSERT OR IGNORE INTO token_rewards ({SELECT_COLS})
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
                    ),
                    libsql::params![
                        id.as_str(),
                        new.session_id,
                        new.recipient_id,
                        new.amount,
                        i64::from(new.duration_minutes),
                        fmt_datetime(&now())
                    ],
                )
                .await?
        };

        let stored = self
            .find_token_reward_by_session(new.session_id)
            .await?
            .ok_or(DatabaseError::NoResult)?;
        if inserted > 0 {
            tracing::debug!(
                reward_id = %stored.id,
                session_id = new.session_id,
                amount = stored.amount,
                "token reward issued"
            );
            Ok(FindOrCreate::created(stored))
        } else {
            Ok(FindOrCreate::existing(stored))
        }
    }

    /// Rewards received by `recipient_id`, newest first.
    pub async fn list_token_rewards_for_recipient(
        &self,
        recipient_id: &str,
    ) -> Result<Vec<TokenReward>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM token_rewards WHERE recipient_id = ?1
                     ORDER BY created_at DESC, rowid DESC"
                ),
                [recipient_id],
            )
            .await?;
        collect_rows(rows, row_to_reward).await
    }
}
