//! # broadside-proto: Wire vocabulary for the broadside bot protocol
//!
//! This crate defines every message a bot and the game server exchange,
//! plus the codec that turns them into and out of JSON text frames.
//!
//! ## The Vocabulary
//!
//! | Concern | Types | What it carries |
//! |---------|-------|-----------------|
//! | Headings | [`CompassDirection`] | 8-way discretized heading ring |
//! | Grid | [`GridPosition`], [`GameMap`], [`GameMapCell`] | One tick's view of the arena |
//! | Commands | [`BotAction`] | What the bot does this tick |
//! | Messages | [`Event`], [`EventKind`] | The envelope on the wire |
//!
//! ## Wire Format
//!
//! Every frame is a UTF-8 JSON object `{ "eventType": ..., "data": ... }`.
//! Map cells and actions use the same adjacent tagging one level down
//! (`{ "type", "data" }` and `{ "action", "payload" }`). All of this is
//! expressed with serde attributes, so matching on an [`Event`] is
//! exhaustive and no discriminant strings are compared at runtime.
//!
//! Decoding is lenient about unknown object keys and strict about
//! everything else: an unknown `eventType`, a payload of the wrong shape,
//! or a ragged game map is a [`DecodeError`].

#![deny(missing_docs)]

pub mod action;
pub mod codec;
pub mod direction;
pub mod error;
pub mod event;
pub mod map;

// Re-exports for convenience
pub use action::BotAction;
pub use codec::{decode, encode};
pub use direction::CompassDirection;
pub use error::{DecodeError, EncodeError};
pub use event::{AuthData, Empty, Event, EventKind, GameTickData, Origin, StartGameData};
pub use map::{GameMap, GameMapCell, GridPosition, HitBoxData, ProjectileData, ShipData};
