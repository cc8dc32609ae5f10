//! Connection management for WebSocket clients.
//!
//! Tracks connected clients and fans out role-projected payloads.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use skirmish_domain::{project, GameState, Role};
use skirmish_shared::ServerMessage;

use crate::stores::RoleRegistry;

/// Manages all active WebSocket connections.
///
/// Roles live in the shared [`RoleRegistry`]; a connection that never
/// registered is treated as a player.
pub struct ConnectionManager {
    /// Map of connection_id -> sender channel
    connections: RwLock<HashMap<Uuid, mpsc::Sender<ServerMessage>>>,
    roles: Arc<RoleRegistry>,
}

impl ConnectionManager {
    pub fn new(roles: Arc<RoleRegistry>) -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            roles,
        }
    }

    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    /// Register a new connection.
    pub async fn register(&self, connection_id: Uuid, sender: mpsc::Sender<ServerMessage>) {
        let mut connections = self.connections.write().await;
        connections.insert(connection_id, sender);
        tracing::debug!(connection_id = %connection_id, "Connection registered");
    }

    /// Unregister a connection and forget its role.
    pub async fn unregister(&self, connection_id: Uuid) {
        let mut connections = self.connections.write().await;
        if connections.remove(&connection_id).is_some() {
            tracing::debug!(connection_id = %connection_id, "Connection unregistered");
        }
        self.roles.remove(connection_id);
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Direct send, no projection.
    pub async fn send_to(&self, connection_id: Uuid, message: ServerMessage) {
        let connections = self.connections.read().await;
        match connections.get(&connection_id) {
            Some(sender) => {
                if let Err(e) = sender.try_send(message) {
                    tracing::warn!(
                        connection_id = %connection_id,
                        error = %e,
                        "Failed to send message"
                    );
                }
            }
            None => {
                tracing::debug!(connection_id = %connection_id, "Send to unknown connection")
            }
        }
    }

    /// Send every connection except `exclude` a `state-sync` projected for
    /// its role.
    ///
    /// All restricted roles share one projection, so at most two are built.
    pub async fn broadcast_state(&self, state: &GameState, exclude: Option<Uuid>) {
        let mut dm_sync: Option<ServerMessage> = None;
        let mut restricted_sync: Option<ServerMessage> = None;

        self.broadcast_filtered(exclude, |role| {
            let slot = if role.is_dm() {
                &mut dm_sync
            } else {
                &mut restricted_sync
            };
            let message = slot.get_or_insert_with(|| ServerMessage::StateSync {
                state: project(state, role).into_owned(),
            });
            Some(message.clone())
        })
        .await;
    }

    /// Send every connection except `exclude` the payload `build` produces
    /// for its role. `None` withholds the event from that recipient.
    pub async fn broadcast_filtered<F>(&self, exclude: Option<Uuid>, mut build: F)
    where
        F: FnMut(&Role) -> Option<ServerMessage>,
    {
        let connections = self.connections.read().await;
        for (connection_id, sender) in connections.iter() {
            if Some(*connection_id) == exclude {
                continue;
            }
            let role = self.roles.get_role(*connection_id);
            let Some(message) = build(&role) else {
                continue;
            };
            if let Err(e) = sender.try_send(message) {
                tracing::warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to broadcast message"
                );
            }
        }
    }
}
