//! Error types for the runtime.
//!
//! None of these end a session on their own. Protocol violations and tick
//! failures are logged and absorbed by the handler; only
//! [`ClientError`] escapes the client loop.

use std::time::Duration;

use thiserror::Error;

use crate::session::SessionState;

/// A well-formed event arrived while the session was in the wrong state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{trigger} requires session state {required}, but the session is {actual}")]
pub struct ProtocolViolation {
    /// What was attempted (`"startGame"`, `"connection open"`, ...).
    pub trigger: &'static str,
    /// The state the transition needs.
    pub required: SessionState,
    /// The state the session was actually in.
    pub actual: SessionState,
}

/// Errors an [`Agent`](crate::Agent) may report from its decision logic.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AgentError {
    /// The decision logic failed.
    #[error("decision failed: {0}")]
    Failed(String),

    /// The agent noticed its tick was cancelled and gave up.
    #[error("cancelled")]
    Cancelled,

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Why a tick produced no decision.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TickError {
    /// A tick was scheduled without an in-game context.
    #[error("no session context for tick")]
    MissingContext,

    /// The agent did not finish within the tick budget.
    #[error("agent missed its {0:?} deadline")]
    DeadlineExceeded(Duration),

    /// The agent returned an error.
    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    /// The agent panicked.
    #[error("agent panicked")]
    Panicked,

    /// The agent task was cancelled by the runtime before finishing.
    #[error("agent task aborted: {0}")]
    Aborted(String),
}

/// Errors from a [`Transport`](crate::Transport).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Writing a frame failed.
    #[error("send failed: {0}")]
    Send(String),

    /// Reading a frame failed.
    #[error("receive failed: {0}")]
    Receive(String),

    /// Closing the connection failed.
    #[error("close failed: {0}")]
    Close(String),
}

/// Errors that end a [`BotClient`](crate::BotClient) run.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}
