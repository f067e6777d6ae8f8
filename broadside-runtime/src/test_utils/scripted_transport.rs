//! ScriptedTransport: replays inbound frames and records outbound ones.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use broadside_proto::{Event, decode};

use crate::error::TransportError;
use crate::transport::Transport;

/// Handle onto the frames a [`ScriptedTransport`] has sent.
///
/// Stays valid after the transport has been moved into a client.
#[derive(Debug, Clone, Default)]
pub struct SentFrames {
    frames: Arc<Mutex<Vec<String>>>,
}

impl SentFrames {
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.frames.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Raw frames, in send order.
    pub fn frames(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Sent frames decoded back into events. Undecodable frames are skipped.
    pub fn events(&self) -> Vec<Event> {
        self.lock().iter().filter_map(|f| decode(f).ok()).collect()
    }

    /// Number of frames sent.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been sent.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// A transport whose inbound side is a fixed script.
///
/// `recv` yields the scripted items in order and then reports the
/// connection as closed. Everything passed to `send` is recorded in
/// [`SentFrames`].
pub struct ScriptedTransport {
    inbound: VecDeque<Result<String, TransportError>>,
    sent: SentFrames,
    fail_sends: bool,
    closed: bool,
}

impl ScriptedTransport {
    /// A transport that will deliver `frames`, then close.
    pub fn new<I, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inbound: frames.into_iter().map(|f| Ok(f.into())).collect(),
            sent: SentFrames::default(),
            fail_sends: false,
            closed: false,
        }
    }

    /// Append an inbound frame to the script.
    pub fn push_frame(&mut self, frame: impl Into<String>) {
        self.inbound.push_back(Ok(frame.into()));
    }

    /// Append an inbound event, encoded, to the script.
    pub fn push_event(&mut self, event: &Event) {
        match broadside_proto::encode(event) {
            Ok(frame) => self.push_frame(frame),
            Err(e) => self.push_error(TransportError::Receive(e.to_string())),
        }
    }

    /// Append a receive error to the script.
    pub fn push_error(&mut self, error: TransportError) {
        self.inbound.push_back(Err(error));
    }

    /// Make every `send` fail.
    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    /// Handle onto the sent frames.
    pub fn sent(&self) -> SentFrames {
        self.sent.clone()
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        if self.fail_sends {
            return Err(TransportError::Send("scripted send failure".into()));
        }
        self.sent.lock().push(frame);
        Ok(())
    }

    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        self.inbound.pop_front()
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.closed = true;
        Ok(())
    }
}
