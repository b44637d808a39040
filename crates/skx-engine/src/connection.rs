//! Connection lifecycle.
//!
//! ```text
//! request ──▶ pending ──respond(accepted)──▶ accepted (+ chat room)
//!                    └──respond(rejected)──▶ rejected
//! ```
//!
//! One connection per unordered user pair, whatever its status. Only the
//! recipient responds, and both outcomes are terminal. Entering `accepted`
//! provisions exactly one chat room, even under concurrent accepts.

use chrono::Utc;
use skx_core::entities::{ChatRoom, Connection, ConnectionView};
use skx_core::enums::{ConnectionStatus, Decision, EntityType};
use skx_core::repository::{NewConnection, Repository};

use crate::{EngineError, EngineResult, SkillExchange};

impl<R: Repository> SkillExchange<R> {
    /// Ask `to_user` to connect.
    ///
    /// A blank or missing message falls back to `connection.default_message`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` when `from_user == to_user`
    /// - `NotFound` if either user or the referenced event does not exist
    /// - `AlreadyConnected` if the pair has a connection in either direction
    pub async fn request_connection(
        &self,
        from_user: &str,
        to_user: &str,
        event_id: Option<&str>,
        message: Option<&str>,
    ) -> EngineResult<Connection> {
        if from_user == to_user {
            return Err(EngineError::invalid_request(
                "cannot send a connection request to yourself",
            ));
        }
        self.require_user(from_user).await?;
        self.require_user(to_user).await?;
        let event_id = event_id.map(str::trim).filter(|e| !e.is_empty());
        if let Some(event_id) = event_id {
            self.get_event(event_id).await?;
        }

        if let Some(existing) = self
            .repo
            .find_connection_by_user_pair(from_user, to_user)
            .await?
        {
            return Err(already_connected(from_user, to_user, existing.id));
        }

        let message = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.connection.default_message);
        let new = NewConnection {
            from_user_id: from_user,
            to_user_id: to_user,
            event_id,
            message,
        };

        match self.repo.create_connection(&new).await {
            Ok(connection) => {
                tracing::info!(
                    connection_id = %connection.id,
                    from_user,
                    to_user,
                    "connection requested"
                );
                Ok(connection)
            }
            Err(e) if e.is_conflict() => {
                // Lost a race with a request for the same pair.
                tracing::warn!(from_user, to_user, error = %e, "connection pair conflict");
                match self
                    .repo
                    .find_connection_by_user_pair(from_user, to_user)
                    .await?
                {
                    Some(existing) => Err(already_connected(from_user, to_user, existing.id)),
                    None => Err(e.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The recipient accepts or rejects a pending connection.
    ///
    /// Accepting returns the connection with its chat room. Racing accepts
    /// both succeed and share one room. A retry of an accept whose room was
    /// never provisioned completes the provisioning.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the connection does not exist
    /// - `Forbidden` unless `responder` is the recipient
    /// - `InvalidTransition` if the connection is no longer pending
    pub async fn respond_to_connection(
        &self,
        connection_id: &str,
        responder: &str,
        decision: Decision,
    ) -> EngineResult<ConnectionView> {
        let connection = self.require_connection(connection_id).await?;
        if connection.to_user_id != responder {
            return Err(EngineError::forbidden(
                responder,
                EntityType::Connection,
                connection_id,
            ));
        }

        let target = decision.target_status();
        if !connection.status.can_transition_to(target) {
            if connection.status == ConnectionStatus::Accepted
                && decision == Decision::Accepted
                && let Some(view) = self.repair_accepted(&connection).await?
            {
                return Ok(view);
            }
            return Err(invalid_transition(connection_id, connection.status, target));
        }

        // A concurrent identical decision may land first; accept either.
        let Some(updated) = self
            .repo
            .update_connection_status(connection_id, &[ConnectionStatus::Pending, target], target)
            .await?
        else {
            let current = self.require_connection(connection_id).await?;
            return Err(invalid_transition(connection_id, current.status, target));
        };

        let chat_room = match decision {
            Decision::Accepted => Some(self.ensure_chat_room(&updated).await?),
            Decision::Rejected => None,
        };
        tracing::info!(connection_id, responder, status = %updated.status, "connection answered");
        Ok(ConnectionView {
            connection: updated,
            chat_room,
        })
    }

    /// Fetch a connection with its chat room, for one of its two parties.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent, `Forbidden` unless `requester` is a party.
    pub async fn get_connection(
        &self,
        connection_id: &str,
        requester: &str,
    ) -> EngineResult<ConnectionView> {
        let connection = self.require_connection(connection_id).await?;
        if !connection.involves(requester) {
            return Err(EngineError::forbidden(
                requester,
                EntityType::Connection,
                connection_id,
            ));
        }
        let chat_room = self.repo.find_chat_room_by_connection(connection_id).await?;
        Ok(ConnectionView {
            connection,
            chat_room,
        })
    }

    /// Connections where `user_id` is either party, newest first.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist.
    pub async fn list_connections(
        &self,
        user_id: &str,
        status: Option<ConnectionStatus>,
    ) -> EngineResult<Vec<Connection>> {
        self.require_user(user_id).await?;
        Ok(self.repo.list_connections_for_user(user_id, status).await?)
    }

    pub(crate) async fn require_connection(&self, connection_id: &str) -> EngineResult<Connection> {
        self.repo
            .find_connection_by_id(connection_id)
            .await?
            .ok_or_else(|| EngineError::not_found(EntityType::Connection, connection_id))
    }

    /// Return the connection's room, creating it if absent.
    async fn ensure_chat_room(&self, connection: &Connection) -> EngineResult<ChatRoom> {
        if let Some(room) = self.repo.find_chat_room_by_connection(&connection.id).await? {
            tracing::debug!(connection_id = %connection.id, room_id = %room.id, "chat room exists");
            return Ok(room);
        }
        let room = self
            .repo
            .create_chat_room(&connection.id, Utc::now())
            .await?;
        if room.created {
            tracing::debug!(connection_id = %connection.id, room_id = %room.value.id, "chat room provisioned");
        } else {
            tracing::debug!(connection_id = %connection.id, room_id = %room.value.id, "chat room provisioned concurrently");
        }
        Ok(room.value)
    }

    /// An accepted connection without a room is a half-finished accept.
    async fn repair_accepted(&self, connection: &Connection) -> EngineResult<Option<ConnectionView>> {
        if self
            .repo
            .find_chat_room_by_connection(&connection.id)
            .await?
            .is_some()
        {
            return Ok(None);
        }
        tracing::warn!(connection_id = %connection.id, "accepted connection had no chat room");
        let room = self.ensure_chat_room(connection).await?;
        Ok(Some(ConnectionView {
            connection: connection.clone(),
            chat_room: Some(room),
        }))
    }
}

fn already_connected(from_user: &str, to_user: &str, existing_id: String) -> EngineError {
    EngineError::AlreadyConnected {
        from_user: from_user.to_string(),
        to_user: to_user.to_string(),
        existing_id,
    }
}

fn invalid_transition(
    connection_id: &str,
    from: ConnectionStatus,
    to: ConnectionStatus,
) -> EngineError {
    EngineError::InvalidTransition {
        connection_id: connection_id.to_string(),
        from,
        to,
    }
}
