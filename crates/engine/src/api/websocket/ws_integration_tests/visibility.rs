use super::*;

#[tokio::test]
async fn when_dm_reveals_monster_then_player_sync_includes_it() {
    let ws_state = build_test_state(GameState::default(), now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut dm_ws = ws_connect(addr).await;
    ws_register(&mut dm_ws, "dm").await;

    // DM adds a hidden monster.
    let hidden = Character::monster("m1").with_field("currentHp", json!(10));
    ws_send_client(
        &mut dm_ws,
        &ClientMessage::UpdateState {
            update: StateUpdate {
                characters: Some(vec![hidden.clone()]),
                ..StateUpdate::default()
            },
        },
    )
    .await;
    ws_flush(&mut dm_ws).await;

    // Player joins and sees nothing.
    let mut player_ws = ws_connect(addr).await;
    let initial = ws_register(&mut player_ws, "player").await;
    assert!(initial.characters.is_empty());

    // DM reveals the monster.
    ws_send_client(
        &mut dm_ws,
        &ClientMessage::UpdateState {
            update: StateUpdate {
                characters: Some(vec![hidden.revealed(true)]),
                ..StateUpdate::default()
            },
        },
    )
    .await;

    let ServerMessage::StateSync { state } = ws_expect_message(&mut player_ws, WAIT, |m| {
        matches!(m, ServerMessage::StateSync { .. })
    })
    .await
    else {
        unreachable!();
    };
    assert_eq!(ids(&state.characters), vec!["m1"]);
    assert_eq!(state.characters[0].field("currentHp"), Some(&json!(10)));

    server.abort();
}

#[tokio::test]
async fn when_dm_updates_hidden_monster_then_players_hear_nothing() {
    let initial = GameState {
        characters: vec![Character::player("pc1"), Character::monster("m1")],
        ..GameState::default()
    };
    let ws_state = build_test_state(initial, now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut dm_ws = ws_connect(addr).await;
    ws_register(&mut dm_ws, "dm").await;
    let mut player_ws = ws_connect(addr).await;
    let synced = ws_register(&mut player_ws, "player").await;
    assert_eq!(ids(&synced.characters), vec!["pc1"]);
    let mut observer_ws = ws_connect(addr).await;
    ws_register(&mut observer_ws, "dm").await;

    ws_send_client(
        &mut dm_ws,
        &ClientMessage::UpdateCharacter {
            character: Character::monster("m1").with_field("currentHp", json!(4)),
        },
    )
    .await;

    // A second DM gets the update; the originator does not.
    let ServerMessage::CharacterUpdated { character } =
        ws_expect_message(&mut observer_ws, WAIT, |m| {
            matches!(m, ServerMessage::CharacterUpdated { .. })
        })
        .await
    else {
        unreachable!();
    };
    assert_eq!(character.field("currentHp"), Some(&json!(4)));

    ws_expect_no_message_matching(&mut player_ws, QUIET, |m| {
        matches!(m, ServerMessage::CharacterUpdated { .. } | ServerMessage::StateSync { .. })
    })
    .await;
    ws_expect_no_message_matching(&mut dm_ws, QUIET, |m| {
        matches!(m, ServerMessage::CharacterUpdated { .. })
    })
    .await;

    server.abort();
}

#[tokio::test]
async fn when_dm_hides_revealed_monster_then_players_resync_without_it() {
    let initial = GameState {
        characters: vec![
            Character::player("pc1"),
            Character::monster("m1").revealed(true),
        ],
        ..GameState::default()
    };
    let ws_state = build_test_state(initial, now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut dm_ws = ws_connect(addr).await;
    ws_register(&mut dm_ws, "dm").await;
    let mut player_ws = ws_connect(addr).await;
    let synced = ws_register(&mut player_ws, "player").await;
    assert_eq!(ids(&synced.characters), vec!["pc1", "m1"]);

    ws_send_client(
        &mut dm_ws,
        &ClientMessage::UpdateCharacter {
            character: Character::monster("m1").revealed(false),
        },
    )
    .await;

    let ServerMessage::StateSync { state } = ws_expect_message(&mut player_ws, WAIT, |m| {
        matches!(
            m,
            ServerMessage::StateSync { .. } | ServerMessage::CharacterUpdated { .. }
        )
    })
    .await
    else {
        panic!("expected a state-sync rather than a character update");
    };
    assert_eq!(ids(&state.characters), vec!["pc1"]);

    server.abort();
}

#[tokio::test]
async fn when_unregistered_connection_receives_sync_then_it_is_projected() {
    let initial = GameState {
        characters: vec![Character::player("pc1"), Character::monster("m1")],
        ..GameState::default()
    };
    let ws_state = build_test_state(initial, now());
    let (addr, server) = spawn_ws_server(ws_state.clone()).await;

    let mut silent_ws = ws_connect(addr).await;
    ws_flush(&mut silent_ws).await;
    let mut dm_ws = ws_connect(addr).await;
    ws_register(&mut dm_ws, "dm").await;

    ws_send_client(
        &mut dm_ws,
        &ClientMessage::UpdateCombat {
            combat_state: skirmish_domain::CombatState {
                active: true,
                round: 1,
                acted_this_round: vec!["m1".into(), "pc1".into()],
                ..Default::default()
            },
        },
    )
    .await;

    let ServerMessage::CombatUpdated { combat_state } =
        ws_expect_message(&mut silent_ws, WAIT, |m| {
            matches!(m, ServerMessage::CombatUpdated { .. })
        })
        .await
    else {
        unreachable!();
    };
    assert!(combat_state.active);
    assert_eq!(
        combat_state.acted_this_round,
        vec![skirmish_domain::CharacterId::new("pc1")]
    );

    server.abort();
}
