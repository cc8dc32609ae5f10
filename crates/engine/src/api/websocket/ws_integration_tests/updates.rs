use super::*;

fn table() -> GameState {
    GameState {
        characters: vec![
            Character::player("pc1").with_field("currentHp", json!(10)),
            Character::monster("m1").with_field("currentHp", json!(30)),
        ],
        ..GameState::default()
    }
}

#[tokio::test]
async fn when_dm_registers_then_full_state_is_returned() {
    let ws_state = build_test_state(table(), now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut dm_ws = ws_connect(addr).await;
    let state = ws_register(&mut dm_ws, "dm").await;
    assert_eq!(ids(&state.characters), vec!["pc1", "m1"]);

    server.abort();
}

#[tokio::test]
async fn when_player_sends_state_then_hidden_characters_are_untouched() {
    let ws_state = build_test_state(table(), now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut dm_ws = ws_connect(addr).await;
    ws_register(&mut dm_ws, "dm").await;
    let mut player_ws = ws_connect(addr).await;
    ws_register(&mut player_ws, "player").await;

    ws_send_client(
        &mut player_ws,
        &ClientMessage::UpdateState {
            update: StateUpdate {
                characters: Some(vec![
                    Character::player("pc1").with_field("currentHp", json!(7)),
                    Character::monster("m1").with_field("currentHp", json!(0)),
                    Character::player("pc2"),
                ]),
                monster_database: Some(vec![json!({"name": "Dragon"})]),
                ..StateUpdate::default()
            },
        },
    )
    .await;

    let ServerMessage::StateSync { state } = ws_expect_message(&mut dm_ws, WAIT, |m| {
        matches!(m, ServerMessage::StateSync { .. })
    })
    .await
    else {
        unreachable!();
    };
    assert_eq!(ids(&state.characters), vec!["pc1", "m1", "pc2"]);
    assert_eq!(state.characters[0].field("currentHp"), Some(&json!(7)));
    assert_eq!(state.characters[1].field("currentHp"), Some(&json!(30)));
    assert!(state.monster_database.is_empty());

    // The originator is not echoed.
    ws_expect_no_message_matching(&mut player_ws, QUIET, |m| {
        matches!(m, ServerMessage::StateSync { .. })
    })
    .await;

    server.abort();
}

#[tokio::test]
async fn when_player_updates_hidden_character_then_it_is_dropped() {
    let ws_state = build_test_state(table(), now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut dm_ws = ws_connect(addr).await;
    ws_register(&mut dm_ws, "dm").await;
    let mut player_ws = ws_connect(addr).await;
    ws_register(&mut player_ws, "player").await;

    ws_send_client(
        &mut player_ws,
        &ClientMessage::UpdateCharacter {
            character: Character::monster("m1")
                .revealed(true)
                .with_field("currentHp", json!(1)),
        },
    )
    .await;
    ws_flush(&mut player_ws).await;

    ws_expect_no_message_matching(&mut dm_ws, QUIET, |m| {
        matches!(m, ServerMessage::CharacterUpdated { .. })
    })
    .await;
    let document = ws_state.app.store.lock().await;
    assert_eq!(document.characters[1].field("currentHp"), Some(&json!(30)));
    assert!(!document.characters[1].revealed_to_players);
    drop(document);

    server.abort();
}

#[tokio::test]
async fn when_frame_is_malformed_then_connection_keeps_working() {
    let ws_state = build_test_state(table(), now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut dm_ws = ws_connect(addr).await;
    ws_send_raw(&mut dm_ws, "{not json").await;
    ws_send_raw(&mut dm_ws, r#"{"type": "roll-dice", "sides": 20}"#).await;
    ws_send_raw(&mut dm_ws, r#"{"type": "update-character"}"#).await;

    // Still usable afterwards, and nothing was sent back for the bad frames.
    let state = ws_register(&mut dm_ws, "dm").await;
    assert_eq!(state.characters.len(), 2);
    ws_flush(&mut dm_ws).await;

    server.abort();
}

#[tokio::test]
async fn when_connection_closes_then_role_is_forgotten() {
    let ws_state = build_test_state(table(), now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut dm_ws = ws_connect(addr).await;
    ws_register(&mut dm_ws, "dm").await;
    assert_eq!(ws_state.app.roles.len(), 1);

    dm_ws.close(None).await.unwrap();

    tokio::time::timeout(WAIT, async {
        while ws_state.connections.connection_count().await > 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();
    assert!(ws_state.app.roles.is_empty());

    server.abort();
}
