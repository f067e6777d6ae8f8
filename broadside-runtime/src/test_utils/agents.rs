//! Agents with fixed behavior.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use broadside_proto::{BotAction, GameTickData};

use crate::agent::{Agent, TickContext};
use crate::error::AgentError;

/// Always returns the same action, immediately.
pub struct FixedAgent {
    action: BotAction,
}

impl FixedAgent {
    /// Agent answering every tick with `action`.
    pub fn new(action: BotAction) -> Self {
        Self { action }
    }
}

#[async_trait]
impl Agent for FixedAgent {
    async fn decide(
        &self,
        _ctx: &TickContext,
        _tick: &GameTickData,
    ) -> Result<Option<BotAction>, AgentError> {
        Ok(Some(self.action))
    }
}

/// Never decides anything.
pub struct NoopAgent;

#[async_trait]
impl Agent for NoopAgent {
    async fn decide(
        &self,
        _ctx: &TickContext,
        _tick: &GameTickData,
    ) -> Result<Option<BotAction>, AgentError> {
        Ok(None)
    }
}

/// Sleeps for a fixed time, then returns its action.
pub struct SleepyAgent {
    delay: Duration,
    action: BotAction,
}

impl SleepyAgent {
    /// Agent that takes `delay` to come up with `action`.
    pub fn new(delay: Duration, action: BotAction) -> Self {
        Self { delay, action }
    }
}

#[async_trait]
impl Agent for SleepyAgent {
    async fn decide(
        &self,
        _ctx: &TickContext,
        _tick: &GameTickData,
    ) -> Result<Option<BotAction>, AgentError> {
        tokio::time::sleep(self.delay).await;
        Ok(Some(self.action))
    }
}

/// Always fails with the given message.
pub struct FailingAgent {
    message: String,
}

impl FailingAgent {
    /// Agent failing every tick with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Agent for FailingAgent {
    async fn decide(
        &self,
        _ctx: &TickContext,
        _tick: &GameTickData,
    ) -> Result<Option<BotAction>, AgentError> {
        Err(AgentError::Failed(self.message.clone()))
    }
}

/// Panics on every tick.
pub struct PanickingAgent;

#[async_trait]
impl Agent for PanickingAgent {
    async fn decide(
        &self,
        ctx: &TickContext,
        _tick: &GameTickData,
    ) -> Result<Option<BotAction>, AgentError> {
        panic!("agent panicked on turn {}", ctx.turn_number)
    }
}

/// Hands its cancellation token to a spawned watcher and never finishes.
///
/// The watcher outlives the aborted agent task; [`WatchfulAgent::observed_cancel`]
/// reports whether it saw the token fire.
#[derive(Default)]
pub struct WatchfulAgent {
    observed: Arc<AtomicBool>,
}

impl WatchfulAgent {
    /// A fresh agent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a spawned watcher has seen a tick get cancelled.
    pub fn observed_cancel(&self) -> bool {
        self.observed.load(Ordering::SeqCst)
    }

    /// Shared flag, for checking after the agent has moved into a scheduler.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.observed)
    }
}

#[async_trait]
impl Agent for WatchfulAgent {
    async fn decide(
        &self,
        ctx: &TickContext,
        _tick: &GameTickData,
    ) -> Result<Option<BotAction>, AgentError> {
        let token = ctx.cancellation_token().clone();
        let observed = Arc::clone(&self.observed);
        tokio::spawn(async move {
            token.cancelled().await;
            observed.store(true, Ordering::SeqCst);
        });
        std::future::pending::<()>().await;
        Ok(None)
    }
}
