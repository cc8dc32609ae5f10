use super::*;

use skirmish_domain::{
    project, project_character, project_combat, Character, CombatState, GameState, StateUpdate,
};

pub(super) async fn handle_update_state(
    state: &WsState,
    connection_id: Uuid,
    update: StateUpdate,
) -> Option<ServerMessage> {
    let role = state.app.roles.get_role(connection_id);

    let mut document = state.app.store.lock().await;
    document.apply_update(&role, update);
    state
        .connections
        .broadcast_state(&document, Some(connection_id))
        .await;
    drop(document);

    state.app.autosave.request();
    None
}

/// Replace one character and tell everyone else who may see it.
///
/// Restricted recipients never learn about a hidden character. If the DM
/// hides a character those recipients could see, they get a fresh projected
/// sync instead so it drops out of their view.
pub(super) async fn handle_update_character(
    state: &WsState,
    connection_id: Uuid,
    character: Character,
) -> Option<ServerMessage> {
    let role = state.app.roles.get_role(connection_id);

    let mut document = state.app.store.lock().await;
    let was_visible = document
        .character(&character.id)
        .is_some_and(Character::is_visible_to_players);

    if let Err(e) = document.update_character(&role, character.clone()) {
        log_dropped(connection_id, &e);
        return None;
    }

    let document: &GameState = &document;
    let mut restricted_sync: Option<ServerMessage> = None;
    state
        .connections
        .broadcast_filtered(Some(connection_id), |recipient| {
            if let Some(character) = project_character(&character, recipient) {
                Some(ServerMessage::CharacterUpdated { character })
            } else if was_visible {
                let sync = restricted_sync.get_or_insert_with(|| ServerMessage::StateSync {
                    state: project(document, recipient).into_owned(),
                });
                Some(sync.clone())
            } else {
                None
            }
        })
        .await;

    state.app.autosave.request();
    None
}

pub(super) async fn handle_update_combat(
    state: &WsState,
    connection_id: Uuid,
    combat_state: CombatState,
) -> Option<ServerMessage> {
    let mut document = state.app.store.lock().await;
    document.update_combat(combat_state);

    let document: &GameState = &document;
    state
        .connections
        .broadcast_filtered(Some(connection_id), |recipient| {
            Some(ServerMessage::CombatUpdated {
                combat_state: project_combat(
                    &document.combat_state,
                    &document.characters,
                    recipient,
                ),
            })
        })
        .await;

    state.app.autosave.request();
    None
}
