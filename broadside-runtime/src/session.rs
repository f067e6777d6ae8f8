//! Session lifecycle state.

use broadside_proto::StartGameData;

use crate::error::ProtocolViolation;

/// Where the connection is in its lifecycle.
///
/// `Unconnected → Unauthorized → Idle → InGame → Idle → ...`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// No connection yet.
    #[default]
    Unconnected,
    /// Connected, credentials sent, waiting for `authAck`.
    Unauthorized,
    /// Authorized, between matches.
    Idle,
    /// A match is running.
    InGame,
}

impl SessionState {
    /// Short lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Unconnected => "unconnected",
            SessionState::Unauthorized => "unauthorized",
            SessionState::Idle => "idle",
            SessionState::InGame => "in-game",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Match parameters, valid for the duration of one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    /// Tick budget in milliseconds. Non-positive means unbounded.
    pub tick_length_ms: i64,
    /// Maximum eighth-turns a ship may rotate per tick.
    pub turn_rate: u32,
}

impl From<StartGameData> for SessionContext {
    /// Rounds the tick length to whole milliseconds and truncates the turn
    /// rate. Out-of-range values saturate and a negative turn rate becomes
    /// zero.
    fn from(data: StartGameData) -> Self {
        Self {
            tick_length_ms: data.tick_length.round() as i64,
            turn_rate: data.turn_rate as u32,
        }
    }
}

/// The session: current state plus the match context.
///
/// The context exists exactly while the state is [`SessionState::InGame`].
/// Both fields are private; the transition methods are the only way to
/// change them and each one refuses to fire from the wrong state, leaving
/// the session untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
    context: Option<SessionContext>,
}

impl Session {
    /// A fresh, unconnected session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Match context, present only while in game.
    pub fn context(&self) -> Option<&SessionContext> {
        self.context.as_ref()
    }

    /// Check that the session is in `required` before acting on `trigger`.
    pub fn require(
        &self,
        trigger: &'static str,
        required: SessionState,
    ) -> Result<(), ProtocolViolation> {
        if self.state == required {
            Ok(())
        } else {
            Err(ProtocolViolation {
                trigger,
                required,
                actual: self.state,
            })
        }
    }

    /// The transport opened: `Unconnected → Unauthorized`.
    pub fn connect(&mut self) -> Result<(), ProtocolViolation> {
        self.require("connection open", SessionState::Unconnected)?;
        self.state = SessionState::Unauthorized;
        Ok(())
    }

    /// Credentials accepted: `Unauthorized → Idle`.
    pub fn authorize(&mut self) -> Result<(), ProtocolViolation> {
        self.require("authAck", SessionState::Unauthorized)?;
        self.state = SessionState::Idle;
        Ok(())
    }

    /// A match starts: `Idle → InGame`, storing its context.
    pub fn start_game(&mut self, context: SessionContext) -> Result<(), ProtocolViolation> {
        self.require("startGame", SessionState::Idle)?;
        self.state = SessionState::InGame;
        self.context = Some(context);
        Ok(())
    }

    /// The match ends: `InGame → Idle`, dropping its context.
    pub fn end_game(&mut self) -> Result<(), ProtocolViolation> {
        self.require("endGame", SessionState::InGame)?;
        self.state = SessionState::Idle;
        self.context = None;
        Ok(())
    }
}
