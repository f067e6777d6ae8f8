//! End-to-end session tests: a full match played over a scripted transport.
//!
//! Each test feeds the client a server script and checks what the bot sent
//! back. No network is involved.
//!
//! 1. **Full match**: handshake, ticks, end, second match
//! 2. **Degraded ticks**: slow and failing agents still answer every tick
//! 3. **Hostile input**: malformed and out-of-order frames change nothing
//! 4. **Steering**: an agent built on the geometry helpers

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use broadside_geometry::{direction_between, entity_coordinates, partial_turn};
use broadside_proto::{
    BotAction, CompassDirection, Event, EventKind, GameMapCell, GameTickData, encode,
};
use broadside_runtime::test_utils::{FailingAgent, FixedAgent, ScriptedTransport, SleepyAgent};
use broadside_runtime::*;
use serde_json::json;

fn client(transport: ScriptedTransport, agent: impl Agent) -> BotClient<ScriptedTransport> {
    let handler = ProtocolHandler::new(
        TickScheduler::new(Arc::new(agent)),
        Credentials::new("team-token", "rusty"),
    );
    BotClient::new(transport, handler)
}

fn frame(value: serde_json::Value) -> String {
    value.to_string()
}

fn auth_ack() -> String {
    frame(json!({"eventType": "authAck", "data": {}}))
}

fn start_game(tick_length: i64, turn_rate: u32) -> String {
    frame(json!({
        "eventType": "startGame",
        "data": {"tickLength": tick_length, "turnRate": turn_rate}
    }))
}

fn empty_tick(turn_number: u64) -> String {
    frame(json!({
        "eventType": "gameTick",
        "data": {
            "turnNumber": turn_number,
            "gameMap": [
                [{"type": "empty", "data": {}}, {"type": "outOfVision", "data": {}}],
                [{"type": "audioSignature", "data": {}}, {"type": "empty", "data": {}}]
            ]
        }
    }))
}

fn end_game() -> String {
    frame(json!({"eventType": "endGame", "data": {}}))
}

fn kinds(events: &[Event]) -> Vec<EventKind> {
    events.iter().map(Event::kind).collect()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// 1. Full match
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn full_match_replies_in_order() {
    let shoot = BotAction::Shoot { mass: 2, speed: 4 };
    let transport = ScriptedTransport::new([
        auth_ack(),
        start_game(1000, 2),
        empty_tick(1),
        empty_tick(2),
        end_game(),
    ]);
    let sent = transport.sent();
    let mut client = client(transport, FixedAgent::new(shoot));

    client.run().await.unwrap();

    assert_eq!(
        sent.events(),
        vec![
            Event::auth("team-token", "rusty"),
            Event::start_ack(),
            Event::game_action(shoot),
            Event::game_action(shoot),
            Event::end_ack(),
        ]
    );
    assert_eq!(client.handler().session().state(), SessionState::Idle);
}

#[tokio::test]
async fn auth_frame_carries_token_and_bot_name() {
    let transport = ScriptedTransport::new(Vec::<String>::new());
    let sent = transport.sent();
    client(transport, FixedAgent::new(BotAction::IDLE))
        .run()
        .await
        .unwrap();

    let frames = sent.frames();
    assert_eq!(frames.len(), 1);
    let value: serde_json::Value = serde_json::from_str(&frames[0]).unwrap();
    assert_eq!(
        value,
        json!({"eventType": "auth", "data": {"token": "team-token", "botName": "rusty"}})
    );
}

#[tokio::test]
async fn second_match_on_the_same_connection() {
    let transport = ScriptedTransport::new([
        auth_ack(),
        start_game(500, 1),
        empty_tick(1),
        end_game(),
        start_game(800, 3),
        empty_tick(1),
    ]);
    let sent = transport.sent();
    let mut client = client(transport, FixedAgent::new(BotAction::IDLE));
    client.run().await.unwrap();

    assert_eq!(
        kinds(&sent.events()),
        vec![
            EventKind::Auth,
            EventKind::StartAck,
            EventKind::GameAction,
            EventKind::EndAck,
            EventKind::StartAck,
            EventKind::GameAction,
        ]
    );
    let session = client.handler().session();
    assert_eq!(session.state(), SessionState::InGame);
    assert_eq!(session.context().unwrap().turn_rate, 3);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// 2. Degraded ticks
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test(start_paused = true)]
async fn slow_agent_gets_idle_fallback_exactly_once_per_tick() {
    let transport = ScriptedTransport::new([
        auth_ack(),
        start_game(200, 2),
        empty_tick(1),
        empty_tick(2),
        empty_tick(3),
    ]);
    let sent = transport.sent();
    let agent = SleepyAgent::new(Duration::from_millis(400), BotAction::Shoot { mass: 1, speed: 1 });
    client(transport, agent).run().await.unwrap();

    let actions: Vec<Event> = sent
        .events()
        .into_iter()
        .filter(|e| e.kind() == EventKind::GameAction)
        .collect();
    assert_eq!(actions, vec![Event::game_action(BotAction::IDLE); 3]);
}

#[tokio::test(start_paused = true)]
async fn agent_within_budget_is_used() {
    let turn = BotAction::Turn {
        direction: CompassDirection::West,
    };
    let transport = ScriptedTransport::new([auth_ack(), start_game(200, 2), empty_tick(1)]);
    let sent = transport.sent();
    client(transport, SleepyAgent::new(Duration::from_millis(75), turn))
        .run()
        .await
        .unwrap();

    assert_eq!(sent.events().last(), Some(&Event::game_action(turn)));
}

#[tokio::test]
async fn failing_agent_gets_idle_fallback() {
    let transport = ScriptedTransport::new([auth_ack(), start_game(1000, 2), empty_tick(1)]);
    let sent = transport.sent();
    client(transport, FailingAgent::new("no plan"))
        .run()
        .await
        .unwrap();

    assert_eq!(
        sent.events().last(),
        Some(&Event::game_action(BotAction::IDLE))
    );
}

#[tokio::test]
async fn idle_fallback_wire_shape() {
    let frame = encode(&Event::game_action(BotAction::IDLE)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
    assert_eq!(
        value,
        json!({"eventType": "gameAction", "data": {"action": "move", "payload": {"distance": 0}}})
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// 3. Hostile input
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn out_of_order_and_malformed_frames_are_dropped() {
    let transport = ScriptedTransport::new([
        // Before authorization.
        start_game(1000, 2),
        empty_tick(0),
        "{not json".to_string(),
        auth_ack(),
        // Duplicate authAck.
        auth_ack(),
        // Tick before the match starts.
        empty_tick(1),
        end_game(),
        // Unknown event type.
        frame(json!({"eventType": "reboot", "data": {}})),
        // Client-side event echoed back.
        frame(json!({"eventType": "startAck", "data": {}})),
        // Ragged map.
        frame(json!({
            "eventType": "gameTick",
            "data": {"turnNumber": 1, "gameMap": [[{"type": "empty", "data": {}}], []]}
        })),
    ]);
    let sent = transport.sent();
    let mut client = client(transport, FixedAgent::new(BotAction::IDLE));
    client.run().await.unwrap();

    assert_eq!(sent.events(), vec![Event::auth("team-token", "rusty")]);
    assert_eq!(client.handler().session().state(), SessionState::Idle);
}

#[tokio::test]
async fn start_game_during_a_match_keeps_the_first_context() {
    let transport = ScriptedTransport::new([
        auth_ack(),
        start_game(1000, 2),
        start_game(10, 7),
        empty_tick(1),
    ]);
    let sent = transport.sent();
    let mut client = client(transport, FixedAgent::new(BotAction::IDLE));
    client.run().await.unwrap();

    assert_eq!(
        kinds(&sent.events()),
        vec![EventKind::Auth, EventKind::StartAck, EventKind::GameAction]
    );
    let context = client.handler().session().context().copied().unwrap();
    assert_eq!(context.tick_length_ms, 1000);
    assert_eq!(context.turn_rate, 2);
}

#[tokio::test]
async fn receive_error_surfaces_after_replies_so_far() {
    let mut transport = ScriptedTransport::new([auth_ack(), start_game(1000, 2)]);
    transport.push_error(TransportError::Receive("connection reset".into()));
    transport.push_frame(empty_tick(1));
    let sent = transport.sent();

    let err = client(transport, FixedAgent::new(BotAction::IDLE))
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(TransportError::Receive(_))));
    assert_eq!(
        kinds(&sent.events()),
        vec![EventKind::Auth, EventKind::StartAck]
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// 4. Steering
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Turns toward the enemy at the session's turn rate; shoots once facing it.
struct Hunter;

#[async_trait]
impl Agent for Hunter {
    async fn decide(
        &self,
        ctx: &TickContext,
        tick: &GameTickData,
    ) -> Result<Option<BotAction>, AgentError> {
        let Some(me) = entity_coordinates("me", &tick.game_map) else {
            return Ok(None);
        };
        let Some(enemy) = entity_coordinates("enemy", &tick.game_map) else {
            return Ok(None);
        };
        let heading = match tick.game_map.get(me) {
            Some(GameMapCell::Ship(ship)) => ship.direction,
            _ => return Err(AgentError::Failed("own ship cell missing".into())),
        };
        let wanted = direction_between(me, enemy);
        if heading == wanted {
            return Ok(Some(BotAction::Shoot { mass: 1, speed: 3 }));
        }
        Ok(Some(BotAction::Turn {
            direction: partial_turn(heading, wanted, ctx.turn_rate()),
        }))
    }
}

fn ship(id: &str, x: i32, y: i32, direction: &str) -> serde_json::Value {
    json!({
        "type": "ship",
        "data": {
            "id": id,
            "position": {"x": x, "y": y},
            "health": 100,
            "heat": 0,
            "direction": direction
        }
    })
}

fn hunting_tick(turn_number: u64, heading: &str) -> String {
    let empty = json!({"type": "empty", "data": {}});
    let hitbox = json!({"type": "hitBox", "data": {"entityId": "enemy"}});
    // "me" in column 0, "enemy" two columns to the right with its hitbox
    // between them. The direction helpers read +x as south, so the bearing
    // from "me" to "enemy" is south even though the map shows it to the right.
    frame(json!({
        "eventType": "gameTick",
        "data": {
            "turnNumber": turn_number,
            "gameMap": [
                [ship("me", 0, 0, heading), hitbox, ship("enemy", 2, 0, "n")],
                [empty, empty, empty]
            ]
        }
    }))
}

#[tokio::test]
async fn hunter_turns_then_shoots() {
    let transport = ScriptedTransport::new([
        auth_ack(),
        start_game(1000, 1),
        hunting_tick(1, "n"),
        hunting_tick(2, "s"),
    ]);
    let sent = transport.sent();
    client(transport, Hunter).run().await.unwrap();

    let actions: Vec<Event> = sent
        .events()
        .into_iter()
        .filter(|e| e.kind() == EventKind::GameAction)
        .collect();
    assert_eq!(
        actions,
        vec![
            // North to South is a reversal: clockwise, one step at rate 1.
            Event::game_action(BotAction::Turn {
                direction: CompassDirection::NorthEast
            }),
            Event::game_action(BotAction::Shoot { mass: 1, speed: 3 }),
        ]
    );
}
