use super::*;

use skirmish_domain::{
    project_characters, project_combat, GameState, HistoryApplied, HistoryDirection, Role,
};

pub(super) async fn handle_save_history_entry(
    state: &WsState,
    connection_id: Uuid,
    page: &str,
    description: String,
) -> Option<ServerMessage> {
    let page = parse_page(connection_id, page)?;
    let role = state.app.roles.get_role(connection_id);
    let timestamp = state.app.timestamp();

    let mut document = state.app.store.lock().await;
    if let Err(e) = document.record_entry(page, &role, description, timestamp) {
        log_dropped(connection_id, &e);
        return None;
    }
    tracing::debug!(
        connection_id = %connection_id,
        page = %page,
        depth = document.history.len(page),
        "History entry recorded"
    );
    state
        .connections
        .broadcast_state(&document, Some(connection_id))
        .await;
    drop(document);

    state.app.autosave.request();
    None
}

pub(super) async fn handle_undo(
    state: &WsState,
    connection_id: Uuid,
    page: &str,
) -> Option<ServerMessage> {
    replay(state, connection_id, page, HistoryDirection::Undo).await
}

pub(super) async fn handle_redo(
    state: &WsState,
    connection_id: Uuid,
    page: &str,
) -> Option<ServerMessage> {
    replay(state, connection_id, page, HistoryDirection::Redo).await
}

/// Apply one undo or redo step and fan the result out to every connection,
/// the requester included. An empty stack is reported to the requester only.
async fn replay(
    state: &WsState,
    connection_id: Uuid,
    page: &str,
    direction: HistoryDirection,
) -> Option<ServerMessage> {
    let page = parse_page(connection_id, page)?;
    let role = state.app.roles.get_role(connection_id);
    let timestamp = state.app.timestamp();

    let mut document = state.app.store.lock().await;
    let result = match direction {
        HistoryDirection::Undo => document.undo(page, &role, timestamp),
        HistoryDirection::Redo => document.redo(page, &role, timestamp),
    };

    let applied = match result {
        Ok(applied) => applied,
        Err(e) if e.is_reportable() => {
            tracing::debug!(connection_id = %connection_id, error = %e, "History step unavailable");
            state
                .connections
                .send_to(
                    connection_id,
                    ServerMessage::HistoryError {
                        message: e.to_string(),
                    },
                )
                .await;
            return None;
        }
        Err(e) => {
            log_dropped(connection_id, &e);
            return None;
        }
    };

    tracing::info!(
        connection_id = %connection_id,
        page = %applied.page,
        direction = %applied.direction,
        description = %applied.description,
        "History applied"
    );

    let document: &GameState = &document;
    state
        .connections
        .broadcast_filtered(None, |recipient| {
            Some(history_applied(document, &applied, recipient))
        })
        .await;

    state.app.autosave.request();
    None
}

/// `history-applied` as `recipient` may see it.
///
/// Restricted recipients get projected characters, and for a DM-only page
/// neither the description nor the stack depths.
fn history_applied(document: &GameState, applied: &HistoryApplied, recipient: &Role) -> ServerMessage {
    let page = applied.page;
    let redacted = page.is_dm_only() && recipient.is_restricted();

    let (description, undo_depth, redo_depth) = if redacted {
        (String::new(), 0, 0)
    } else {
        (
            applied.description.clone(),
            document.history.len(page),
            document.redo.len(page),
        )
    };

    ServerMessage::HistoryApplied {
        page,
        description,
        direction: applied.direction,
        characters: project_characters(&document.characters, recipient),
        combat_state: project_combat(&document.combat_state, &document.characters, recipient),
        undo_depth,
        redo_depth,
    }
}
