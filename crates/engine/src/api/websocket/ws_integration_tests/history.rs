use super::*;

use skirmish_domain::HistoryDirection;

fn save_entry(page: &str, description: &str) -> ClientMessage {
    ClientMessage::SaveHistoryEntry {
        page: page.to_string(),
        description: description.to_string(),
    }
}

fn undo(page: &str) -> ClientMessage {
    ClientMessage::RequestUndo {
        page: page.to_string(),
    }
}

fn redo(page: &str) -> ClientMessage {
    ClientMessage::RequestRedo {
        page: page.to_string(),
    }
}

fn with_hp(id: &str, hp: i64) -> ClientMessage {
    ClientMessage::UpdateCharacter {
        character: Character::player(id).with_field("currentHp", json!(hp)),
    }
}

#[tokio::test]
async fn when_dm_undoes_combat_change_then_hp_is_restored_and_redo_recorded() {
    let initial = GameState {
        characters: vec![Character::player("pc1").with_field("currentHp", json!(10))],
        ..GameState::default()
    };
    let ws_state = build_test_state(initial, now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut dm_ws = ws_connect(addr).await;
    ws_register(&mut dm_ws, "dm").await;
    let mut player_ws = ws_connect(addr).await;
    ws_register(&mut player_ws, "player").await;

    ws_send_client(&mut dm_ws, &save_entry("combat", "start")).await;
    ws_send_client(&mut dm_ws, &with_hp("pc1", 3)).await;
    ws_send_client(&mut dm_ws, &undo("combat")).await;

    let msg = ws_expect_message(&mut dm_ws, WAIT, |m| {
        matches!(m, ServerMessage::HistoryApplied { .. })
    })
    .await;
    let ServerMessage::HistoryApplied {
        page,
        description,
        direction,
        characters,
        undo_depth,
        redo_depth,
        ..
    } = msg
    else {
        unreachable!();
    };
    assert_eq!(page, Page::Combat);
    assert_eq!(description, "start");
    assert_eq!(direction, HistoryDirection::Undo);
    assert_eq!(characters[0].field("currentHp"), Some(&json!(10)));
    assert_eq!(undo_depth, 0);
    assert_eq!(redo_depth, 1);

    // Requester and everyone else get the replay.
    let _ = ws_expect_message(&mut player_ws, WAIT, |m| {
        matches!(m, ServerMessage::HistoryApplied { .. })
    })
    .await;

    let document = ws_state.app.store.lock().await;
    assert_eq!(
        document.characters[0].field("currentHp"),
        Some(&json!(10))
    );
    assert_eq!(document.redo.len(Page::Combat), 1);
    assert!(document.history.is_empty(Page::Combat));
    drop(document);

    server.abort();
}

#[tokio::test]
async fn when_dm_redoes_then_change_is_reapplied() {
    let initial = GameState {
        characters: vec![Character::player("pc1").with_field("currentHp", json!(10))],
        ..GameState::default()
    };
    let ws_state = build_test_state(initial, now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut dm_ws = ws_connect(addr).await;
    ws_register(&mut dm_ws, "dm").await;

    ws_send_client(&mut dm_ws, &save_entry("combat", "hit")).await;
    ws_send_client(&mut dm_ws, &with_hp("pc1", 3)).await;
    ws_send_client(&mut dm_ws, &undo("combat")).await;
    ws_send_client(&mut dm_ws, &redo("combat")).await;

    let msg = ws_expect_message(&mut dm_ws, WAIT, |m| {
        matches!(
            m,
            ServerMessage::HistoryApplied {
                direction: HistoryDirection::Redo,
                ..
            }
        )
    })
    .await;
    let ServerMessage::HistoryApplied {
        description,
        characters,
        undo_depth,
        redo_depth,
        ..
    } = msg
    else {
        unreachable!();
    };
    assert_eq!(description, "hit");
    assert_eq!(characters[0].field("currentHp"), Some(&json!(3)));
    assert_eq!((undo_depth, redo_depth), (1, 0));

    server.abort();
}

#[tokio::test]
async fn when_stack_is_empty_then_only_requester_gets_history_error() {
    let ws_state = build_test_state(GameState::default(), now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut dm_ws = ws_connect(addr).await;
    ws_register(&mut dm_ws, "dm").await;
    let mut player_ws = ws_connect(addr).await;
    ws_register(&mut player_ws, "player").await;

    ws_send_client(&mut player_ws, &redo("spells")).await;

    let ServerMessage::HistoryError { message } = ws_expect_message(&mut player_ws, WAIT, |m| {
        matches!(m, ServerMessage::HistoryError { .. })
    })
    .await
    else {
        unreachable!();
    };
    assert!(message.contains("redo"));

    ws_expect_no_message_matching(&mut dm_ws, QUIET, |m| {
        matches!(
            m,
            ServerMessage::HistoryError { .. } | ServerMessage::HistoryApplied { .. }
        )
    })
    .await;

    server.abort();
}

#[tokio::test]
async fn when_page_is_unknown_then_request_is_ignored() {
    let ws_state = build_test_state(GameState::default(), now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut dm_ws = ws_connect(addr).await;
    ws_register(&mut dm_ws, "dm").await;

    ws_send_client(&mut dm_ws, &undo("journal")).await;
    ws_send_client(&mut dm_ws, &save_entry("journal", "nope")).await;
    ws_send_client(&mut dm_ws, &ClientMessage::Heartbeat).await;

    // Nothing but the pong comes back.
    let first = ws_expect_message(&mut dm_ws, WAIT, |_| true).await;
    assert_eq!(first, ServerMessage::Pong);

    server.abort();
}

#[tokio::test]
async fn when_player_touches_monster_history_then_nothing_happens() {
    let initial = GameState {
        characters: vec![Character::monster("m1").with_field("monsterAbilities", json!(["bite"]))],
        ..GameState::default()
    };
    let ws_state = build_test_state(initial, now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut player_ws = ws_connect(addr).await;
    ws_register(&mut player_ws, "player").await;

    ws_send_client(&mut player_ws, &save_entry("monsters", "sneaky")).await;
    ws_send_client(&mut player_ws, &undo("monsters")).await;
    ws_send_client(&mut player_ws, &ClientMessage::Heartbeat).await;

    // Denied silently: no history-error that would reveal the page's state.
    let first = ws_expect_message(&mut player_ws, WAIT, |_| true).await;
    assert_eq!(first, ServerMessage::Pong);
    assert!(ws_state
        .app
        .store
        .lock()
        .await
        .history
        .is_empty(Page::Monsters));

    server.abort();
}

#[tokio::test]
async fn when_combat_undo_restores_hidden_monster_then_players_do_not_see_it() {
    let initial = GameState {
        characters: vec![
            Character::player("pc1").with_field("currentHp", json!(10)),
            Character::monster("m1").with_field("currentHp", json!(20)),
        ],
        ..GameState::default()
    };
    let ws_state = build_test_state(initial, now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut dm_ws = ws_connect(addr).await;
    ws_register(&mut dm_ws, "dm").await;
    let mut player_ws = ws_connect(addr).await;
    ws_register(&mut player_ws, "player").await;

    // DM records, removes the monster, then undoes the removal.
    ws_send_client(&mut dm_ws, &save_entry("combat", "before removal")).await;
    ws_send_client(
        &mut dm_ws,
        &ClientMessage::UpdateState {
            update: StateUpdate {
                characters: Some(vec![
                    Character::player("pc1").with_field("currentHp", json!(10))
                ]),
                ..StateUpdate::default()
            },
        },
    )
    .await;
    ws_send_client(&mut dm_ws, &undo("combat")).await;

    let ServerMessage::HistoryApplied { characters, .. } =
        ws_expect_message(&mut dm_ws, WAIT, |m| {
            matches!(m, ServerMessage::HistoryApplied { .. })
        })
        .await
    else {
        unreachable!();
    };
    assert_eq!(ids(&characters), vec!["pc1", "m1"]);

    let ServerMessage::HistoryApplied { characters, .. } =
        ws_expect_message(&mut player_ws, WAIT, |m| {
            matches!(m, ServerMessage::HistoryApplied { .. })
        })
        .await
    else {
        unreachable!();
    };
    assert_eq!(ids(&characters), vec!["pc1"]);

    server.abort();
}
