//! Text-frame codec.
//!
//! The transport only moves strings; these two functions are the whole
//! boundary between frames and typed [`Event`]s.

use crate::error::{DecodeError, EncodeError};
use crate::event::Event;

/// Decode one inbound text frame.
///
/// A ragged game map surfaces from serde as a custom error, so it is
/// reported as [`DecodeError::Malformed`] like any other shape problem.
///
/// ```
/// use broadside_proto::{decode, Event};
///
/// let event = decode(r#"{"eventType":"authAck","data":{}}"#).unwrap();
/// assert_eq!(event, Event::auth_ack());
/// assert!(decode("not json").is_err());
/// ```
pub fn decode(frame: &str) -> Result<Event, DecodeError> {
    Ok(serde_json::from_str(frame)?)
}

/// Encode one outbound event as a text frame.
pub fn encode(event: &Event) -> Result<String, EncodeError> {
    Ok(serde_json::to_string(event)?)
}
