//! Per-tick deadline race between the agent and the clock.

use std::sync::Arc;
use std::time::Duration;

use broadside_proto::{BotAction, GameTickData};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::agent::{Agent, TickContext};
use crate::error::TickError;
use crate::session::SessionContext;

/// Time reserved out of every tick for encoding and sending the reply.
pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::from_millis(50);

/// Scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Subtracted from the tick length to get the agent's budget.
    pub safety_margin: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            safety_margin: DEFAULT_SAFETY_MARGIN,
        }
    }
}

/// Runs the agent for one tick without letting it stall the session.
///
/// The agent runs on its own task. The scheduler waits for it until the
/// tick budget (tick length minus the safety margin) runs out; then it
/// cancels the tick's token, aborts the task and reports
/// [`TickError::DeadlineExceeded`]. A non-positive tick length disables
/// the deadline.
pub struct TickScheduler {
    agent: Arc<dyn Agent>,
    config: SchedulerConfig,
}

impl TickScheduler {
    /// Scheduler with the default safety margin.
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self::with_config(agent, SchedulerConfig::default())
    }

    /// Scheduler with explicit settings.
    pub fn with_config(agent: Arc<dyn Agent>, config: SchedulerConfig) -> Self {
        Self { agent, config }
    }

    /// Current settings.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The agent's budget for a tick in `context`, or `None` if unbounded.
    ///
    /// A tick shorter than the safety margin gets a zero budget.
    pub fn budget(&self, context: &SessionContext) -> Option<Duration> {
        let tick_length = u64::try_from(context.tick_length_ms).ok().filter(|ms| *ms > 0)?;
        Some(Duration::from_millis(tick_length).saturating_sub(self.config.safety_margin))
    }

    /// Run the agent for `tick`, reporting every failure as a [`TickError`].
    ///
    /// `Ok(None)` means the agent finished in time and chose no action.
    pub async fn try_decide(
        &self,
        context: Option<SessionContext>,
        tick: GameTickData,
    ) -> Result<Option<BotAction>, TickError> {
        let context = context.ok_or(TickError::MissingContext)?;
        let turn = tick.turn_number;
        let budget = self.budget(&context);
        let started = Instant::now();
        let token = CancellationToken::new();
        let ctx = TickContext::new(
            context,
            turn,
            budget.map(|budget| started + budget),
            token.clone(),
        );

        let agent = Arc::clone(&self.agent);
        let mut task = tokio::spawn(async move { agent.decide(&ctx, &tick).await });

        let joined = match budget {
            Some(budget) => match tokio::time::timeout(budget, &mut task).await {
                Ok(joined) => joined,
                Err(_) => {
                    token.cancel();
                    task.abort();
                    tracing::debug!(
                        turn,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        timed_out = true,
                        "tick processed"
                    );
                    return Err(TickError::DeadlineExceeded(budget));
                }
            },
            None => (&mut task).await,
        };

        tracing::debug!(
            turn,
            elapsed_ms = started.elapsed().as_millis() as u64,
            timed_out = false,
            "tick processed"
        );

        match joined {
            Ok(decision) => Ok(decision?),
            Err(e) if e.is_panic() => Err(TickError::Panicked),
            Err(e) => Err(TickError::Aborted(e.to_string())),
        }
    }

    /// Run the agent for `tick`, logging failures.
    ///
    /// Returns `None` whenever no action was decided, for whatever reason.
    pub async fn decide(
        &self,
        context: Option<SessionContext>,
        tick: GameTickData,
    ) -> Option<BotAction> {
        let turn = tick.turn_number;
        match self.try_decide(context, tick).await {
            Ok(action) => {
                tracing::debug!(
                    turn,
                    action = action.as_ref().map_or("none", BotAction::name),
                    "agent decided"
                );
                action
            }
            Err(TickError::DeadlineExceeded(budget)) => {
                tracing::warn!(
                    turn,
                    budget_ms = budget.as_millis() as u64,
                    "agent timed out, abandoning tick"
                );
                None
            }
            Err(TickError::MissingContext) => {
                tracing::error!(turn, "got no session context in tick processing");
                None
            }
            Err(e) => {
                tracing::error!(turn, error = %e, "agent failed in tick processing");
                None
            }
        }
    }
}
