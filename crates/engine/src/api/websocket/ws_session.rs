use super::*;

use skirmish_domain::{project, Role};

/// Record the connection's role and reply with the document projected for it.
///
/// The reply is enqueued while the store is locked so it cannot be overtaken
/// by a broadcast for a later mutation.
pub(super) async fn handle_register_mode(
    state: &WsState,
    connection_id: Uuid,
    role: Role,
) -> Option<ServerMessage> {
    state.app.roles.set_role(connection_id, role.clone());

    let document = state.app.store.lock().await;
    let sync = ServerMessage::StateSync {
        state: project(&document, &role).into_owned(),
    };
    state.connections.send_to(connection_id, sync).await;
    None
}
