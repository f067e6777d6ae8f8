//! The seam between the client loop and the network.

use async_trait::async_trait;

use crate::error::TransportError;

/// A bidirectional channel of UTF-8 text frames, delivered in order.
///
/// Connection establishment belongs to the implementation's constructor;
/// a `Transport` value is always already open.
#[async_trait]
pub trait Transport: Send {
    /// Write one frame.
    async fn send(&mut self, frame: String) -> Result<(), TransportError>;

    /// Read the next frame. `None` once the peer has closed the connection.
    async fn recv(&mut self) -> Option<Result<String, TransportError>>;

    /// Close the connection.
    async fn close(&mut self) -> Result<(), TransportError>;
}
