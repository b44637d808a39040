//! Chat repository — one room per connection, append-only messages.

use chrono::{DateTime, Utc};

use skx_core::entities::{ChatRoom, Message};
use skx_core::ids::{PREFIX_CHAT_ROOM, PREFIX_MESSAGE};
use skx_core::repository::FindOrCreate;

use crate::error::DatabaseError;
use crate::helpers::{collect_rows, fmt_datetime, now, parse_datetime};
use crate::store::SkxStore;

const ROOM_COLS: &str = "id, connection_id, last_message_at, created_at";
const MESSAGE_COLS: &str = "id, chat_room_id, sender_id, content, created_at";

fn row_to_room(row: &libsql::Row) -> Result<ChatRoom, DatabaseError> {
    Ok(ChatRoom {
        id: row.get(0)?,
        connection_id: row.get(1)?,
        last_message_at: parse_datetime(&row.get::<String>(2)?)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

fn row_to_message(row: &libsql::Row) -> Result<Message, DatabaseError> {
    Ok(Message {
        id: row.get(0)?,
        chat_room_id: row.get(1)?,
        sender_id: row.get(2)?,
        content: row.get(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl SkxStore {
    /// Create the room for `connection_id` unless one exists.
    ///
    /// Concurrent callers all get the same stored room; exactly one of them
    /// sees `created == true`.
    pub async fn create_chat_room(
        &self,
        connection_id: &str,
        last_message_at: DateTime<Utc>,
    ) -> Result<FindOrCreate<ChatRoom>, DatabaseError> {
        let inserted = {
            let _gate = self.write_gate().await;
            let id = self.db().generate_id(PREFIX_CHAT_ROOM).await?;
            self.db()
                .conn()
                .execute(
                    &format!(
                        "INSERT INTO chat_rooms ({ROOM_COLS}) VALUES (?1, ?2, ?3, ?4)
                         ON CONFLICT(connection_id) DO NOTHING"
                    ),
                    libsql::params![
                        id.as_str(),
                        connection_id,
                        fmt_datetime(&last_message_at),
                        fmt_datetime(&now())
                    ],
                )
                .await?
        };

        let room = self
            .find_chat_room_by_connection(connection_id)
            .await?
            .ok_or_else(|| {
                DatabaseError::InvalidState(format!(
                    "chat room for connection '{connection_id}' missing after insert"
                ))
            })?;
        if inserted > 0 {
            tracing::debug!(room_id = %room.id, connection_id, "chat room created");
            Ok(FindOrCreate::created(room))
        } else {
            Ok(FindOrCreate::existing(room))
        }
    }

    pub async fn find_chat_room_by_connection(
        &self,
        connection_id: &str,
    ) -> Result<Option<ChatRoom>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {ROOM_COLS} FROM chat_rooms WHERE connection_id = ?1"),
                [connection_id],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_room).transpose()
    }

    pub async fn find_chat_room(&self, id: &str) -> Result<Option<ChatRoom>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {ROOM_COLS} FROM chat_rooms WHERE id = ?1"), [id])
            .await?;
        rows.next().await?.as_ref().map(row_to_room).transpose()
    }

    /// Append a message and move the room's `last_message_at` to its timestamp.
    pub async fn create_message(
        &self,
        chat_room_id: &str,
        sender_id: &str,
        content: &str,
    ) -> Result<Message, DatabaseError> {
        let _gate = self.write_gate().await;
        let now = now();
        let id = self.db().generate_id(PREFIX_MESSAGE).await?;
        let tx = self.db().conn().transaction().await?;

        let bumped = tx
            .execute(
                "UPDATE chat_rooms SET last_message_at = ?1 WHERE id = ?2",
                libsql::params![fmt_datetime(&now), chat_room_id],
            )
            .await?;
        if bumped == 0 {
            tx.rollback().await?;
            return Err(DatabaseError::NoResult);
        }
        tx.execute(
            &format!("INSERT INTO messages ({MESSAGE_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
            libsql::params![
                id.as_str(),
                chat_room_id,
                sender_id,
                content,
                fmt_datetime(&now)
            ],
        )
        .await?;
        tx.commit().await?;

        Ok(Message {
            id,
            chat_room_id: chat_room_id.to_string(),
            sender_id: sender_id.to_string(),
            content: content.to_string(),
            created_at: now,
        })
    }

    /// The latest `limit` messages of a room, oldest first.
    pub async fn list_messages(
        &self,
        chat_room_id: &str,
        limit: u32,
    ) -> Result<Vec<Message>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {MESSAGE_COLS} FROM messages WHERE chat_room_id = ?1
                     ORDER BY created_at DESC, rowid DESC LIMIT ?2"
                ),
                libsql::params![chat_room_id, i64::from(limit)],
            )
            .await?;
        let mut messages = collect_rows(rows, row_to_message).await?;
        messages.reverse();
        Ok(messages)
    }
}
