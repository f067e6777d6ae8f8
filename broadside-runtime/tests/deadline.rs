//! Deadline tests: the scheduler against agents that overrun.
//! Run with: cargo test -p broadside-runtime --features test-utils --test deadline

#![cfg(feature = "test-utils")]

use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use broadside_proto::{BotAction, GameMap, GameTickData};
use broadside_runtime::test_utils::{SleepyAgent, WatchfulAgent};
use broadside_runtime::*;

fn tick(turn_number: u64) -> GameTickData {
    GameTickData {
        turn_number,
        game_map: GameMap::default(),
    }
}

fn context(tick_length_ms: i64) -> Option<SessionContext> {
    Some(SessionContext {
        tick_length_ms,
        turn_rate: 1,
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Cancellation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test(start_paused = true)]
async fn missed_deadline_cancels_the_tick_token() {
    let agent = WatchfulAgent::new();
    let observed = agent.flag();
    let scheduler = TickScheduler::new(Arc::new(agent));

    let err = scheduler.try_decide(context(100), tick(3)).await.unwrap_err();
    assert!(matches!(err, TickError::DeadlineExceeded(_)));

    // Let the watcher run.
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(observed.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn timed_out_tick_still_answers_idle_through_handler() {
    let agent = SleepyAgent::new(Duration::from_secs(10), BotAction::Shoot { mass: 3, speed: 3 });
    let mut handler = ProtocolHandler::new(
        TickScheduler::new(Arc::new(agent)),
        Credentials::new("t", "b"),
    );
    handler.on_open();
    handler.handle_event(broadside_proto::Event::auth_ack()).await;
    handler
        .handle_event(broadside_proto::Event::StartGame(broadside_proto::StartGameData {
            tick_length: 200.0,
            turn_rate: 1.0,
        }))
        .await;

    let started = tokio::time::Instant::now();
    let reply = handler
        .handle_event(broadside_proto::Event::GameTick(tick(1)))
        .await;
    assert_eq!(reply, Some(broadside_proto::Event::game_action(BotAction::IDLE)));
    // Replied at the budget (200 - 50), well before the agent would have.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(150) && elapsed < Duration::from_millis(160));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TickContext as seen by the agent
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Default)]
struct RecordingAgent {
    seen: Mutex<Vec<(u64, Option<Duration>, u32)>>,
}

#[async_trait]
impl Agent for RecordingAgent {
    async fn decide(
        &self,
        ctx: &TickContext,
        tick: &GameTickData,
    ) -> Result<Option<BotAction>, AgentError> {
        assert_eq!(ctx.turn_number, tick.turn_number);
        self.seen
            .lock()
            .unwrap()
            .push((ctx.turn_number, ctx.remaining(), ctx.turn_rate()));
        Ok(None)
    }
}

#[tokio::test(start_paused = true)]
async fn agent_sees_turn_budget_and_rate() {
    let agent = Arc::new(RecordingAgent::default());
    let scheduler = TickScheduler::new(agent.clone());

    scheduler.decide(context(1000), tick(5)).await;
    scheduler.decide(context(0), tick(6)).await;

    let seen = agent.seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![(5, Some(Duration::from_millis(950)), 1), (6, None, 1)]
    );
}

#[tokio::test(start_paused = true)]
async fn consecutive_ticks_do_not_overlap() {
    let agent = SleepyAgent::new(Duration::from_millis(40), BotAction::IDLE);
    let scheduler = TickScheduler::new(Arc::new(agent));
    let started = tokio::time::Instant::now();
    for turn in 1..=3 {
        assert_eq!(
            scheduler.decide(context(500), tick(turn)).await,
            Some(BotAction::IDLE)
        );
    }
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(120) && elapsed < Duration::from_millis(130));
}
