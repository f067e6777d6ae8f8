//! The team's bot logic. Fill in [`TeamAi::decide`].

use async_trait::async_trait;
use broadside_proto::{BotAction, GameTickData};
use broadside_runtime::{Agent, AgentError, TickContext};

use crate::logging::TEAM_AI_TARGET;

/// The team AI.
///
/// Returning `Ok(None)` lets the runtime answer with
/// [`BotAction::IDLE`]. The helpers in [`crate::geometry`] cover the
/// usual heading and lookup chores.
#[derive(Debug, Default)]
pub struct TeamAi;

impl TeamAi {
    /// Create the team AI.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Agent for TeamAi {
    async fn decide(
        &self,
        ctx: &TickContext,
        tick: &GameTickData,
    ) -> Result<Option<BotAction>, AgentError> {
        tracing::info!(
            target: TEAM_AI_TARGET,
            turn = tick.turn_number,
            remaining_ms = ctx.remaining().map(|d| d.as_millis() as u64),
            "processing tick"
        );

        // Insert your code here
        Ok(None)
    }
}
