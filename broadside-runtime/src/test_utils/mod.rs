//! In-memory implementations for testing.
//!
//! Available behind the `test-utils` feature flag: a scripted transport
//! and a handful of agents with fixed behavior.

mod agents;
mod scripted_transport;

pub use agents::{FailingAgent, FixedAgent, NoopAgent, PanickingAgent, SleepyAgent, WatchfulAgent};
pub use scripted_transport::{ScriptedTransport, SentFrames};
