//! Connection repository — pair-unique inserts and conditional status writes.

use skx_core::entities::{Connection, pair_key};
use skx_core::enums::ConnectionStatus;
use skx_core::ids::PREFIX_CONNECTION;
use skx_core::repository::NewConnection;

use crate::error::DatabaseError;
use crate::helpers::{collect_rows, fmt_datetime, get_opt_string, now, parse_datetime, parse_enum};
use crate::store::SkxStore;

const SELECT_COLS: &str =
    "id, from_user_id, to_user_id, event_id, message, status, created_at, updated_at";

fn row_to_connection(row: &libsql::Row) -> Result<Connection, DatabaseError> {
    Ok(Connection {
        id: row.get(0)?,
        from_user_id: row.get(1)?,
        to_user_id: row.get(2)?,
        event_id: get_opt_string(row, 3)?,
        message: row.get(4)?,
        status: parse_enum(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl SkxStore {
    /// Insert a pending connection.
    ///
    /// The `(pair_low, pair_high)` UNIQUE constraint rejects a second
    /// connection for the same unordered pair, whichever direction.
    pub async fn create_connection(
        &self,
        new: &NewConnection<'_>,
    ) -> Result<Connection, DatabaseError> {
        let _gate = self.write_gate().await;
        let now = now();
        let id = self.db().generate_id(PREFIX_CONNECTION).await?;
        let (low, high) = pair_key(new.from_user_id, new.to_user_id);

        self.db()
            .conn()
            .execute(
                "INSERT INTO connections
                 (id, from_user_id, to_user_id, pair_low, pair_high, event_id, message, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                libsql::params![
                    id.as_str(),
                    new.from_user_id,
                    new.to_user_id,
                    low,
                    high,
                    new.event_id,
                    new.message,
                    ConnectionStatus::Pending.as_str(),
                    fmt_datetime(&now),
                    fmt_datetime(&now)
                ],
            )
            .await?;

        Ok(Connection {
            id,
            from_user_id: new.from_user_id.to_string(),
            to_user_id: new.to_user_id.to_string(),
            event_id: new.event_id.map(String::from),
            message: new.message.to_string(),
            status: ConnectionStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn find_connection(&self, id: &str) -> Result<Option<Connection>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM connections WHERE id = ?1"),
                [id],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_connection).transpose()
    }

    pub async fn find_connection_by_pair(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Option<Connection>, DatabaseError> {
        let (low, high) = pair_key(user_a, user_b);
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM connections WHERE pair_low = ?1 AND pair_high = ?2"
                ),
                libsql::params![low, high],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_connection).transpose()
    }

    /// Connections where `user_id` is either party, newest first.
    pub async fn list_connections_for_user(
        &self,
        user_id: &str,
        status: Option<ConnectionStatus>,
    ) -> Result<Vec<Connection>, DatabaseError> {
        let rows = match status {
            Some(status) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM connections
                             WHERE (from_user_id = ?1 OR to_user_id = ?1) AND status = ?2
                             ORDER BY created_at DESC, rowid DESC"
                        ),
                        libsql::params![user_id, status.as_str()],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM connections
                             WHERE from_user_id = ?1 OR to_user_id = ?1
                             ORDER BY created_at DESC, rowid DESC"
                        ),
                        [user_id],
                    )
                    .await?
            }
        };
        collect_rows(rows, row_to_connection).await
    }

    /// Set `status = next` only if the current status is in `expected`.
    ///
    /// Returns the updated connection, or `None` when the guard did not match
    /// (or the connection does not exist).
    pub async fn update_connection_status(
        &self,
        id: &str,
        expected: &[ConnectionStatus],
        next: ConnectionStatus,
    ) -> Result<Option<Connection>, DatabaseError> {
        if expected.is_empty() {
            return Ok(None);
        }

        let updated = {
            let _gate = self.write_gate().await;
            let placeholders = (0..expected.len())
                .map(|i| format!("?{}", i + 4))
                .collect::<Vec<_>>()
                .join(", ");
            let mut params: Vec<libsql::Value> = vec![
                next.as_str().into(),
                fmt_datetime(&now()).into(),
                id.into(),
            ];
            params.extend(expected.iter().map(|s| libsql::Value::from(s.as_str())));

            self.db()
                .conn()
                .execute(
                    &format!(
                        "UPDATE connections SET status = ?1, updated_at = ?2
                         WHERE id = ?3 AND status IN ({placeholders})"
                    ),
                    libsql::params_from_iter(params),
                )
                .await?
        };

        if updated == 0 {
            return Ok(None);
        }
        self.find_connection(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{test_store, two_users};
    use pretty_assertions::assert_eq;

    fn request<'a>(from: &'a str, to: &'a str) -> NewConnection<'a> {
        NewConnection {
            from_user_id: from,
            to_user_id: to,
            event_id: None,
            message: "hello",
        }
    }

    #[tokio::test]
    async fn create_connection_roundtrip() {
        let store = test_store().await;
        let (a, b) = two_users(&store).await;

        let conn = store.create_connection(&request(&a, &b)).await.unwrap();
        assert!(conn.id.starts_with("con-"));
        assert_eq!(conn.status, ConnectionStatus::Pending);

        let fetched = store.find_connection(&conn.id).await.unwrap().unwrap();
        assert_eq!(fetched, conn);
    }

    #[tokio::test]
    async fn reverse_pair_is_a_conflict() {
        let store = test_store().await;
        let (a, b) = two_users(&store).await;

        store.create_connection(&request(&a, &b)).await.unwrap();
        let err = store.create_connection(&request(&b, &a)).await.unwrap_err();
        assert!(err.is_unique_violation(), "{err}");
    }

    #[tokio::test]
    async fn find_by_pair_either_direction() {
        let store = test_store().await;
        let (a, b) = two_users(&store).await;
        let conn = store.create_connection(&request(&a, &b)).await.unwrap();

        let forward = store.find_connection_by_pair(&a, &b).await.unwrap();
        let backward = store.find_connection_by_pair(&b, &a).await.unwrap();
        assert_eq!(forward.as_ref().map(|c| c.id.as_str()), Some(conn.id.as_str()));
        assert_eq!(backward, forward);
    }

    #[tokio::test]
    async fn conditional_update_applies_once() {
        let store = test_store().await;
        let (a, b) = two_users(&store).await;
        let conn = store.create_connection(&request(&a, &b)).await.unwrap();

        let accepted = store
            .update_connection_status(
                &conn.id,
                &[ConnectionStatus::Pending],
                ConnectionStatus::Accepted,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(accepted.status, ConnectionStatus::Accepted);

        let again = store
            .update_connection_status(
                &conn.id,
                &[ConnectionStatus::Pending],
                ConnectionStatus::Rejected,
            )
            .await
            .unwrap();
        assert!(again.is_none());
        let current = store.find_connection(&conn.id).await.unwrap().unwrap();
        assert_eq!(current.status, ConnectionStatus::Accepted);
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let store = test_store().await;
        let (a, b) = two_users(&store).await;
        let c = store.create_user("Cy", None).await.unwrap().id;

        let ab = store.create_connection(&request(&a, &b)).await.unwrap();
        store.create_connection(&request(&c, &a)).await.unwrap();
        store
            .update_connection_status(&ab.id, &[ConnectionStatus::Pending], ConnectionStatus::Accepted)
            .await
            .unwrap();

        assert_eq!(store.list_connections_for_user(&a, None).await.unwrap().len(), 2);
        let accepted = store
            .list_connections_for_user(&a, Some(ConnectionStatus::Accepted))
            .await
            .unwrap();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].id, ab.id);
        assert!(store.list_connections_for_user(&b, Some(ConnectionStatus::Rejected)).await.unwrap().is_empty());
    }
}
