//! WebSocket handling for table clients.
//!
//! Handles the WebSocket protocol between the engine and DM/player clients.
//! Every handler locks the game store for the whole read, mutate, project and
//! enqueue sequence, so broadcasts leave in the order mutations were applied.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

mod ws_history;
mod ws_session;
mod ws_state;

use skirmish_domain::{DomainError, Page};
use skirmish_shared::{ClientMessage, ServerMessage};

use super::connections::ConnectionManager;
use crate::app::App;

/// Buffer size for per-connection message channel.
const CONNECTION_CHANNEL_BUFFER: usize = 256;

/// Combined state for WebSocket handlers.
pub struct WsState {
    pub app: Arc<App>,
    pub connections: Arc<ConnectionManager>,
}

/// WebSocket upgrade handler - entry point for client connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<WsState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<WsState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let connection_id = Uuid::new_v4();

    // Bounded channel drained by the writer task below
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(CONNECTION_CHANNEL_BUFFER);

    state.connections.register(connection_id, tx.clone()).await;

    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::error!(error = %e, "Failed to serialize server message"),
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(text.as_str()) {
                Ok(msg) => {
                    if let Some(response) = handle_message(msg, &state, connection_id).await {
                        if tx.try_send(response).is_err() {
                            tracing::warn!(
                                connection_id = %connection_id,
                                "Failed to send response, channel full or closed"
                            );
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(connection_id = %connection_id, error = %e, "Dropping malformed message");
                }
            },
            Ok(Message::Close(_)) => {
                tracing::info!(connection_id = %connection_id, "WebSocket closed by client");
                break;
            }
            Err(e) => {
                tracing::error!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
            // Protocol pings are answered by axum
            _ => {}
        }
    }

    state.connections.unregister(connection_id).await;
    send_task.abort();

    tracing::info!(connection_id = %connection_id, "WebSocket connection terminated");
}

/// Dispatch a parsed client message to the appropriate handler.
///
/// Returns a direct reply only for messages that do not touch the document;
/// document handlers enqueue their own payloads while the store is locked.
async fn handle_message(
    msg: ClientMessage,
    state: &WsState,
    connection_id: Uuid,
) -> Option<ServerMessage> {
    tracing::trace!(connection_id = %connection_id, kind = msg.kind(), "Message received");

    match msg {
        ClientMessage::Heartbeat => Some(ServerMessage::Pong),

        ClientMessage::RegisterMode { role } => {
            ws_session::handle_register_mode(state, connection_id, role).await
        }

        // Document updates
        ClientMessage::UpdateState { update } => {
            ws_state::handle_update_state(state, connection_id, update).await
        }
        ClientMessage::UpdateCharacter { character } => {
            ws_state::handle_update_character(state, connection_id, character).await
        }
        ClientMessage::UpdateCombat { combat_state } => {
            ws_state::handle_update_combat(state, connection_id, combat_state).await
        }

        // History
        ClientMessage::SaveHistoryEntry { page, description } => {
            ws_history::handle_save_history_entry(state, connection_id, &page, description).await
        }
        ClientMessage::RequestUndo { page } => {
            ws_history::handle_undo(state, connection_id, &page).await
        }
        ClientMessage::RequestRedo { page } => {
            ws_history::handle_redo(state, connection_id, &page).await
        }

        ClientMessage::Unknown => {
            tracing::warn!(connection_id = %connection_id, "Dropping message of unknown type");
            None
        }
    }
}

/// Resolve a wire page name, logging and discarding unknown ones.
fn parse_page(connection_id: Uuid, raw: &str) -> Option<Page> {
    match raw.parse::<Page>() {
        Ok(page) => Some(page),
        Err(e) => {
            log_dropped(connection_id, &e);
            None
        }
    }
}

/// Silent drops are visible in logs only.
fn log_dropped(connection_id: Uuid, error: &DomainError) {
    tracing::debug!(connection_id = %connection_id, error = %error, "Request dropped");
}
