//! The message envelope and the payload of each message.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::action::BotAction;
use crate::map::GameMap;

/// A payload with no fields. Serializes as `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Empty {}

/// Credentials sent once, right after the connection opens.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    /// Team access token issued by the server operator.
    pub token: String,
    /// Display name of the bot.
    pub bot_name: String,
}

impl AuthData {
    /// Create auth data from a token and bot name.
    pub fn new(token: impl Into<String>, bot_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            bot_name: bot_name.into(),
        }
    }
}

impl std::fmt::Debug for AuthData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthData")
            .field("token", &"[REDACTED]")
            .field("bot_name", &self.bot_name)
            .finish()
    }
}

/// Game parameters announced when a match starts.
///
/// Both fields are plain JSON numbers on the wire, so `1000` and `1000.0`
/// decode alike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameData {
    /// Wall-clock budget per tick in milliseconds. Zero or negative
    /// means the server does not enforce a budget.
    pub tick_length: f64,
    /// Maximum eighth-turns a ship may rotate per tick.
    pub turn_rate: f64,
}

/// One simulation step's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTickData {
    /// Monotonic tick counter within a match. Decodes from any JSON
    /// number with a non-negative whole value.
    #[serde(deserialize_with = "whole_number")]
    pub turn_number: u64,
    /// What the bot can see this tick.
    pub game_map: GameMap,
}

fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_u64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 => Ok(f as u64),
        _ => Err(D::Error::custom(format!(
            "expected a non-negative whole number, got {number}"
        ))),
    }
}

/// Every protocol message, client-sent and server-sent.
///
/// Serialized as `{ "eventType": "<camelCase variant>", "data": {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "eventType", content = "data", rename_all = "camelCase")]
pub enum Event {
    /// Client: identify the bot.
    Auth(AuthData),
    /// Client: acknowledge a match start.
    StartAck(Empty),
    /// Client: the bot's command for the current tick.
    GameAction(BotAction),
    /// Client: acknowledge a match end.
    EndAck(Empty),
    /// Server: credentials accepted.
    AuthAck(Empty),
    /// Server: a match begins.
    StartGame(StartGameData),
    /// Server: a new tick to act on.
    GameTick(GameTickData),
    /// Server: the match is over.
    EndGame(Empty),
}

/// Which side of the connection sends a given event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Sent by the bot.
    Client,
    /// Sent by the game server.
    Server,
}

/// Payload-free discriminant of an [`Event`], for logging and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`Event::Auth`].
    Auth,
    /// See [`Event::StartAck`].
    StartAck,
    /// See [`Event::GameAction`].
    GameAction,
    /// See [`Event::EndAck`].
    EndAck,
    /// See [`Event::AuthAck`].
    AuthAck,
    /// See [`Event::StartGame`].
    StartGame,
    /// See [`Event::GameTick`].
    GameTick,
    /// See [`Event::EndGame`].
    EndGame,
}

impl EventKind {
    /// The `eventType` string used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Auth => "auth",
            EventKind::StartAck => "startAck",
            EventKind::GameAction => "gameAction",
            EventKind::EndAck => "endAck",
            EventKind::AuthAck => "authAck",
            EventKind::StartGame => "startGame",
            EventKind::GameTick => "gameTick",
            EventKind::EndGame => "endGame",
        }
    }

    /// Which side sends this kind of event.
    pub fn origin(self) -> Origin {
        match self {
            EventKind::Auth | EventKind::StartAck | EventKind::GameAction | EventKind::EndAck => {
                Origin::Client
            }
            EventKind::AuthAck | EventKind::StartGame | EventKind::GameTick | EventKind::EndGame => {
                Origin::Server
            }
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Event {
    /// The payload-free discriminant.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Auth(_) => EventKind::Auth,
            Event::StartAck(_) => EventKind::StartAck,
            Event::GameAction(_) => EventKind::GameAction,
            Event::EndAck(_) => EventKind::EndAck,
            Event::AuthAck(_) => EventKind::AuthAck,
            Event::StartGame(_) => EventKind::StartGame,
            Event::GameTick(_) => EventKind::GameTick,
            Event::EndGame(_) => EventKind::EndGame,
        }
    }

    /// Which side sends this event.
    pub fn origin(&self) -> Origin {
        self.kind().origin()
    }

    /// `auth` event.
    pub fn auth(token: impl Into<String>, bot_name: impl Into<String>) -> Self {
        Event::Auth(AuthData::new(token, bot_name))
    }

    /// `startAck` event.
    pub fn start_ack() -> Self {
        Event::StartAck(Empty {})
    }

    /// `gameAction` event.
    pub fn game_action(action: BotAction) -> Self {
        Event::GameAction(action)
    }

    /// `endAck` event.
    pub fn end_ack() -> Self {
        Event::EndAck(Empty {})
    }

    /// `authAck` event.
    pub fn auth_ack() -> Self {
        Event::AuthAck(Empty {})
    }

    /// `endGame` event.
    pub fn end_game() -> Self {
        Event::EndGame(Empty {})
    }
}
