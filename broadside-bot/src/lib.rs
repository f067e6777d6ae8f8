#![deny(missing_docs)]
//! The broadside bot: configuration, log setup and the team AI.
//!
//! The binary loads a [`BotConfig`], installs logging, wraps [`TeamAi`] in
//! the runtime and plays until the server closes the connection.

pub mod config;
pub mod logging;
pub mod team_ai;

pub use broadside_geometry as geometry;
pub use config::{BotConfig, ConfigError, ConfigLayer};
pub use team_ai::TeamAi;

use std::sync::Arc;

use broadside_runtime::{ClientError, ProtocolHandler, TickScheduler};
use thiserror::Error;

/// Errors that stop the bot before or while playing.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BotError {
    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be installed.
    #[error("logging error: {0}")]
    Logging(String),

    /// The connection failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// The protocol handler for `config`, driving `agent`.
pub fn handler(config: &BotConfig, agent: Arc<dyn broadside_runtime::Agent>) -> ProtocolHandler {
    ProtocolHandler::new(
        TickScheduler::with_config(agent, config.scheduler_config()),
        config.credentials(),
    )
}

/// Connect with `config` and play with the team AI until the server
/// closes the connection.
pub async fn run(config: BotConfig) -> Result<(), BotError> {
    tracing::info!(
        url = %config.websocket_url,
        bot_name = %config.bot_name,
        safety_margin_ms = config.tick_safety_margin.as_millis() as u64,
        "starting bot"
    );
    let handler = handler(&config, Arc::new(TeamAi::new()));
    broadside_runtime::connect_websocket(&config.websocket_url, handler).await?;
    Ok(())
}
