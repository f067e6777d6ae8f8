//! Commands a bot sends back in reply to a game tick.

use serde::{Deserialize, Serialize};

use crate::direction::CompassDirection;

/// What the bot does this tick. Exactly one variant per reply.
///
/// Serialized as `{ "action": "move" | "turn" | "shoot", "payload": {...} }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum BotAction {
    /// Advance along the current heading.
    Move {
        /// Cells to advance.
        distance: u32,
    },
    /// Rotate toward a heading. The server applies the ship's turn rate.
    Turn {
        /// Desired heading.
        direction: CompassDirection,
    },
    /// Fire a projectile along the current heading.
    Shoot {
        /// Projectile mass.
        mass: u32,
        /// Projectile speed in cells per tick.
        speed: u32,
    },
}

impl BotAction {
    /// Zero-distance move.
    ///
    /// Sent whenever a tick produces no decision, so that every game tick
    /// gets exactly one reply. The server treats it the same as a missed
    /// reply: the ship advances zero steps.
    pub const IDLE: BotAction = BotAction::Move { distance: 0 };

    /// Wire tag of this action.
    pub fn name(&self) -> &'static str {
        match self {
            BotAction::Move { .. } => "move",
            BotAction::Turn { .. } => "turn",
            BotAction::Shoot { .. } => "shoot",
        }
    }
}
