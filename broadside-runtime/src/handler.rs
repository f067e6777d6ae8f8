//! Inbound event dispatch against the session state machine.

use broadside_proto::{BotAction, Event, GameTickData, StartGameData, decode};

use crate::scheduler::TickScheduler;
use crate::session::{Session, SessionContext, SessionState};

/// Identity presented to the server on connect.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Team access token.
    pub token: String,
    /// Display name of the bot.
    pub bot_name: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(token: impl Into<String>, bot_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            bot_name: bot_name.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .field("bot_name", &self.bot_name)
            .finish()
    }
}

/// Owns the session and turns each inbound event into at most one reply.
///
/// | Event in | Required state | New state | Reply |
/// |----------|----------------|-----------|-------|
/// | connection open | `Unconnected` | `Unauthorized` | `auth` |
/// | `authAck` | `Unauthorized` | `Idle` | none |
/// | `startGame` | `Idle` | `InGame` | `startAck` |
/// | `gameTick` | `InGame` | `InGame` | `gameAction` |
/// | `endGame` | `InGame` | `Idle` | `endAck` |
///
/// Anything else is logged and dropped with the session unchanged.
pub struct ProtocolHandler {
    session: Session,
    scheduler: TickScheduler,
    credentials: Credentials,
}

impl ProtocolHandler {
    /// A handler with a fresh, unconnected session.
    pub fn new(scheduler: TickScheduler, credentials: Credentials) -> Self {
        Self {
            session: Session::new(),
            scheduler,
            credentials,
        }
    }

    /// The session as it stands.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The transport opened. Returns the `auth` event on the first call.
    pub fn on_open(&mut self) -> Option<Event> {
        if let Err(violation) = self.session.connect() {
            tracing::warn!(%violation, "ignoring repeated connection open");
            return None;
        }
        tracing::info!(
            bot_name = %self.credentials.bot_name,
            "authorizing"
        );
        Some(Event::auth(
            self.credentials.token.clone(),
            self.credentials.bot_name.clone(),
        ))
    }

    /// Decode a text frame and handle it. Undecodable frames are dropped.
    pub async fn handle_frame(&mut self, frame: &str) -> Option<Event> {
        tracing::debug!(frame, "received");
        match decode(frame) {
            Ok(event) => self.handle_event(event).await,
            Err(e) => {
                tracing::error!(error = %e, "dropping undecodable frame");
                None
            }
        }
    }

    /// Validate `event` against the session and apply it.
    pub async fn handle_event(&mut self, event: Event) -> Option<Event> {
        let kind = event.kind();
        match event {
            Event::AuthAck(_) => {
                self.on_auth_ack();
                None
            }
            Event::StartGame(data) => self.on_start_game(data),
            Event::GameTick(tick) => self.on_game_tick(tick).await,
            Event::EndGame(_) => self.on_end_game(),
            Event::Auth(_) | Event::StartAck(_) | Event::GameAction(_) | Event::EndAck(_) => {
                tracing::warn!(event = %kind, "unrecognized event");
                None
            }
        }
    }

    fn on_auth_ack(&mut self) {
        match self.session.authorize() {
            Ok(()) => tracing::info!("authorization successful"),
            Err(violation) => tracing::warn!(%violation, "dropping authAck"),
        }
    }

    fn on_start_game(&mut self, data: StartGameData) -> Option<Event> {
        let context = SessionContext::from(data);
        match self.session.start_game(context) {
            Ok(()) => {
                tracing::info!(
                    tick_length_ms = context.tick_length_ms,
                    turn_rate = context.turn_rate,
                    "game started"
                );
                Some(Event::start_ack())
            }
            Err(violation) => {
                tracing::warn!(%violation, "dropping startGame");
                None
            }
        }
    }

    async fn on_game_tick(&mut self, tick: GameTickData) -> Option<Event> {
        if let Err(violation) = self.session.require("gameTick", SessionState::InGame) {
            tracing::warn!(%violation, turn = tick.turn_number, "dropping gameTick");
            return None;
        }
        let context = self.session.context().copied();
        let action = self
            .scheduler
            .decide(context, tick)
            .await
            .unwrap_or(BotAction::IDLE);
        Some(Event::game_action(action))
    }

    fn on_end_game(&mut self) -> Option<Event> {
        match self.session.end_game() {
            Ok(()) => {
                tracing::info!("game ended");
                Some(Event::end_ack())
            }
            Err(violation) => {
                tracing::warn!(%violation, "dropping endGame");
                None
            }
        }
    }
}
