//! The Agent protocol: what the bot decides each tick.

use std::time::Duration;

use async_trait::async_trait;
use broadside_proto::{BotAction, GameTickData};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::AgentError;
use crate::session::SessionContext;

/// Everything an agent may read about the tick it is deciding, besides the
/// map itself.
///
/// The session context is a copy; agents cannot reach the live session.
#[derive(Debug, Clone)]
pub struct TickContext {
    /// Match parameters for this tick.
    pub session: SessionContext,
    /// Turn number of the tick being decided.
    pub turn_number: u64,
    /// When the runtime stops waiting. `None` when the tick is unbounded.
    pub deadline: Option<Instant>,
    cancellation: CancellationToken,
}

impl TickContext {
    /// Create a tick context.
    pub fn new(
        session: SessionContext,
        turn_number: u64,
        deadline: Option<Instant>,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            session,
            turn_number,
            deadline,
            cancellation,
        }
    }

    /// Maximum eighth-turns a ship may rotate this tick.
    pub fn turn_rate(&self) -> u32 {
        self.session.turn_rate
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Whether the runtime has given up on this tick.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Completes when the runtime gives up on this tick.
    pub async fn cancelled(&self) {
        self.cancellation.cancelled().await;
    }

    /// The tick's cancellation token. Hand a clone to any work the agent
    /// spawns so it stops when the tick is abandoned.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }
}

/// A bot's decision logic.
///
/// Called once per `gameTick` on a dedicated task. Returning `Ok(None)`
/// means "no action"; the runtime then answers with
/// [`BotAction::IDLE`]. Errors and panics are caught and treated the same
/// way. If the deadline passes first, the tick's cancellation token fires
/// and the task is aborted, so long-running work should check
/// [`TickContext::is_cancelled`] or race [`TickContext::cancelled`].
#[async_trait]
pub trait Agent: Send + Sync + 'static {
    /// Decide this tick's action.
    async fn decide(
        &self,
        ctx: &TickContext,
        tick: &GameTickData,
    ) -> Result<Option<BotAction>, AgentError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn _assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn agent_is_object_safe_send_sync() {
        _assert_send_sync::<Box<dyn Agent>>();
        _assert_send_sync::<Arc<dyn Agent>>();
    }

    fn context(deadline: Option<Instant>) -> TickContext {
        TickContext::new(
            SessionContext {
                tick_length_ms: 100,
                turn_rate: 2,
            },
            7,
            deadline,
            CancellationToken::new(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn remaining_counts_down_to_zero() {
        let ctx = context(Some(Instant::now() + Duration::from_millis(40)));
        assert_eq!(ctx.remaining(), Some(Duration::from_millis(40)));
        tokio::time::advance(Duration::from_millis(30)).await;
        assert_eq!(ctx.remaining(), Some(Duration::from_millis(10)));
        tokio::time::advance(Duration::from_millis(30)).await;
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn unbounded_tick_has_no_remaining_time() {
        assert_eq!(context(None).remaining(), None);
    }

    #[tokio::test]
    async fn cancellation_is_visible_through_clones() {
        let ctx = context(None);
        let clone = ctx.clone();
        assert!(!clone.is_cancelled());
        ctx.cancellation_token().cancel();
        assert!(clone.is_cancelled());
        clone.cancelled().await;
        assert_eq!(ctx.turn_rate(), 2);
    }
}
