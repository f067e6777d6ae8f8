//! The single-flow client loop.

use broadside_proto::{Event, EventKind, encode};

use crate::error::ClientError;
use crate::handler::ProtocolHandler;
use crate::transport::Transport;

/// Drives a [`ProtocolHandler`] over a [`Transport`].
///
/// Each frame is handled to completion, and its reply sent, before the
/// next frame is read.
pub struct BotClient<T: Transport> {
    transport: T,
    handler: ProtocolHandler,
}

impl<T: Transport> BotClient<T> {
    /// Pair an open transport with a handler.
    pub fn new(transport: T, handler: ProtocolHandler) -> Self {
        Self { transport, handler }
    }

    /// The handler, for inspecting the session.
    pub fn handler(&self) -> &ProtocolHandler {
        &self.handler
    }

    /// Split into the transport and handler.
    pub fn into_parts(self) -> (T, ProtocolHandler) {
        (self.transport, self.handler)
    }

    /// Authorize, then process frames until the peer closes.
    ///
    /// Returns `Ok(())` on a clean close. Transport failures end the run;
    /// nothing else does.
    pub async fn run(&mut self) -> Result<(), ClientError> {
        if let Some(reply) = self.handler.on_open() {
            self.send(reply).await?;
        }

        while let Some(frame) = self.transport.recv().await {
            let frame = frame?;
            if let Some(reply) = self.handler.handle_frame(&frame).await {
                self.send(reply).await?;
            }
        }

        tracing::info!(
            state = %self.handler.session().state(),
            "connection closed by server"
        );
        Ok(())
    }

    async fn send(&mut self, event: Event) -> Result<(), ClientError> {
        let kind = event.kind();
        let frame = match encode(&event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(event = %kind, error = %e, "dropping unencodable reply");
                return Ok(());
            }
        };
        // The auth frame carries the token.
        if kind == EventKind::Auth {
            tracing::debug!(event = %kind, "sent");
        } else {
            tracing::debug!(event = %kind, frame = %frame, "sent");
        }
        self.transport.send(frame).await?;
        Ok(())
    }
}

/// Connect to `url` over WebSocket and run `handler` until the server
/// closes the connection.
#[cfg(feature = "websocket")]
pub async fn connect_websocket(url: &str, handler: ProtocolHandler) -> Result<(), ClientError> {
    let transport = crate::ws::WsTransport::connect(url).await?;
    let mut client = BotClient::new(transport, handler);
    client.run().await
}
