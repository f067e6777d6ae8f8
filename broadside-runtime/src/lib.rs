//! # broadside-runtime: Client runtime for broadside bots
//!
//! Connects a bot to the game server, enforces the session handshake,
//! hands each tick to the bot under a deadline and always answers.
//!
//! ## The Pieces
//!
//! | Piece | Type | What it does |
//! |-------|------|-------------|
//! | Session | [`Session`], [`SessionState`] | Lifecycle state and the in-game context |
//! | Agent | [`Agent`], [`TickContext`] | The bot's per-tick decision, supplied by the author |
//! | Scheduler | [`TickScheduler`] | Races the agent against the tick deadline |
//! | Handler | [`ProtocolHandler`] | Validates events against the session, produces replies |
//! | Transport | [`Transport`] | Moves text frames; [`WsTransport`] by default |
//! | Client | [`BotClient`] | One sequential receive → handle → send loop |
//!
//! ## Flow of Control
//!
//! Everything runs on a single logical flow. [`BotClient`] awaits each
//! frame's handling to completion before reading the next one, so the
//! session is never touched by two events at once and a new tick never
//! reaches the agent before the previous tick's reply has been sent.
//!
//! ## Always Reply
//!
//! Every `gameTick` accepted in the `InGame` state produces exactly one
//! `gameAction`. Agent errors, panics and missed deadlines all degrade to
//! [`BotAction::IDLE`](broadside_proto::BotAction::IDLE). Nothing in this
//! crate treats a protocol problem as fatal; only transport failures end
//! the client loop.

#![deny(missing_docs)]

pub mod agent;
pub mod client;
pub mod error;
pub mod handler;
pub mod scheduler;
pub mod session;
pub mod transport;

#[cfg(feature = "websocket")]
pub mod ws;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-exports for convenience
pub use agent::{Agent, TickContext};
pub use client::BotClient;
pub use error::{AgentError, ClientError, ProtocolViolation, TickError, TransportError};
pub use handler::{Credentials, ProtocolHandler};
pub use scheduler::{DEFAULT_SAFETY_MARGIN, SchedulerConfig, TickScheduler};
pub use session::{Session, SessionContext, SessionState};
pub use transport::Transport;

#[cfg(feature = "websocket")]
pub use client::connect_websocket;
#[cfg(feature = "websocket")]
pub use ws::WsTransport;
