//! Messaging inside an accepted connection's chat room.

use skx_core::entities::{ChatRoom, Message};
use skx_core::enums::{ConnectionStatus, EntityType};
use skx_core::repository::Repository;

use crate::{EngineError, EngineResult, SkillExchange};

/// Messages returned by `list_messages` when no limit is given.
pub const DEFAULT_MESSAGE_LIMIT: u32 = 100;

impl<R: Repository> SkillExchange<R> {
    /// Post a message to a room. The sender must be a party to the room's
    /// accepted connection.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the room does not exist
    /// - `Forbidden` unless `sender_id` is a party
    /// - `InvalidRequest` for blank content
    pub async fn send_message(
        &self,
        chat_room_id: &str,
        sender_id: &str,
        content: &str,
    ) -> EngineResult<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(EngineError::invalid_request("message content must not be empty"));
        }
        let room = self.room_for_party(chat_room_id, sender_id).await?;

        let message = self.repo.create_message(&room.id, sender_id, content).await?;
        tracing::debug!(room_id = %room.id, sender_id, message_id = %message.id, "message sent");
        Ok(message)
    }

    /// The latest messages in a room, oldest first, for one of its parties.
    ///
    /// # Errors
    ///
    /// `NotFound` if the room does not exist, `Forbidden` unless
    /// `requester` is a party.
    pub async fn list_messages(
        &self,
        chat_room_id: &str,
        requester: &str,
        limit: Option<u32>,
    ) -> EngineResult<Vec<Message>> {
        let room = self.room_for_party(chat_room_id, requester).await?;
        Ok(self
            .repo
            .list_messages(&room.id, limit.unwrap_or(DEFAULT_MESSAGE_LIMIT))
            .await?)
    }

    async fn room_for_party(
        &self,
        chat_room_id: &str,
        user_id: &str,
    ) -> EngineResult<ChatRoom> {
        let room = self
            .repo
            .find_chat_room_by_id(chat_room_id)
            .await?
            .ok_or_else(|| EngineError::not_found(EntityType::ChatRoom, chat_room_id))?;
        let connection = self.require_connection(&room.connection_id).await?;
        if !connection.involves(user_id) || connection.status != ConnectionStatus::Accepted {
            return Err(EngineError::forbidden(user_id, EntityType::ChatRoom, chat_room_id));
        }
        Ok(room)
    }
}
