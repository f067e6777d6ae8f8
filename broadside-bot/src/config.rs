//! Layered bot configuration.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. A JSON file: the path given on the command line, otherwise
//!    `./config.json` if it exists
//! 3. `BROADSIDE_*` environment variables
//!
//! File keys are camelCase (`websocketUrl`, `token`, `botName`,
//! `tickSafetyMarginMs`, `teamAiLogLevel`, `wrapperLogLevel`).

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use broadside_runtime::{Credentials, DEFAULT_SAFETY_MARGIN, SchedulerConfig};
use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

/// File read when no path is given and it exists.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Environment variable for the server URL.
pub const ENV_WEBSOCKET_URL: &str = "BROADSIDE_WEBSOCKET_URL";
/// Environment variable for the team token.
pub const ENV_TOKEN: &str = "BROADSIDE_TOKEN";
/// Environment variable for the bot name.
pub const ENV_BOT_NAME: &str = "BROADSIDE_BOT_NAME";
/// Environment variable for the tick safety margin, in milliseconds.
pub const ENV_TICK_SAFETY_MARGIN_MS: &str = "BROADSIDE_TICK_SAFETY_MARGIN_MS";
/// Environment variable for the team AI log level.
pub const ENV_TEAM_AI_LOG_LEVEL: &str = "BROADSIDE_TEAM_AI_LOG_LEVEL";
/// Environment variable for the runtime log level.
pub const ENV_WRAPPER_LOG_LEVEL: &str = "BROADSIDE_WRAPPER_LOG_LEVEL";

/// Errors from loading configuration.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting has no value in any source.
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// The config file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON of the expected shape.
    #[error("cannot parse {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// A setting has a value that cannot be used.
    #[error("invalid value {value:?} for {key}")]
    Invalid {
        /// Setting name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// One configuration source. Unset fields defer to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigLayer {
    /// Server URL.
    pub websocket_url: Option<String>,
    /// Team token.
    pub token: Option<String>,
    /// Bot display name.
    pub bot_name: Option<String>,
    /// Tick safety margin in milliseconds.
    pub tick_safety_margin_ms: Option<u64>,
    /// Log level for the team AI.
    pub team_ai_log_level: Option<String>,
    /// Log level for the runtime.
    pub wrapper_log_level: Option<String>,
}

impl ConfigLayer {
    /// Read a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read variables through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let tick_safety_margin_ms = match get(ENV_TICK_SAFETY_MARGIN_MS) {
            Some(raw) => Some(raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: ENV_TICK_SAFETY_MARGIN_MS,
                value: raw,
            })?),
            None => None,
        };
        Ok(Self {
            websocket_url: get(ENV_WEBSOCKET_URL),
            token: get(ENV_TOKEN),
            bot_name: get(ENV_BOT_NAME),
            tick_safety_margin_ms,
            team_ai_log_level: get(ENV_TEAM_AI_LOG_LEVEL),
            wrapper_log_level: get(ENV_WRAPPER_LOG_LEVEL),
        })
    }

    /// Overlay `higher` on `self`; set fields in `higher` win.
    pub fn merge(self, higher: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            websocket_url: higher.websocket_url.or(self.websocket_url),
            token: higher.token.or(self.token),
            bot_name: higher.bot_name.or(self.bot_name),
            tick_safety_margin_ms: higher.tick_safety_margin_ms.or(self.tick_safety_margin_ms),
            team_ai_log_level: higher.team_ai_log_level.or(self.team_ai_log_level),
            wrapper_log_level: higher.wrapper_log_level.or(self.wrapper_log_level),
        }
    }
}

/// Complete, validated bot configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Server URL, `ws://` or `wss://`.
    pub websocket_url: String,
    /// Team token. Never logged.
    pub token: String,
    /// Bot display name.
    pub bot_name: String,
    /// Reserved out of every tick for sending the reply.
    pub tick_safety_margin: Duration,
    /// Log level for the team AI.
    pub team_ai_log_level: LevelFilter,
    /// Log level for the runtime.
    pub wrapper_log_level: LevelFilter,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("websocket_url", &self.websocket_url)
            .field("token", &"[REDACTED]")
            .field("bot_name", &self.bot_name)
            .field("tick_safety_margin", &self.tick_safety_margin)
            .field("team_ai_log_level", &self.team_ai_log_level)
            .field("wrapper_log_level", &self.wrapper_log_level)
            .finish()
    }
}

impl BotConfig {
    /// Load all layers. `path` overrides the default config file location;
    /// an explicit path must exist, the default one may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => ConfigLayer::from_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    ConfigLayer::from_file(default)?
                } else {
                    ConfigLayer::default()
                }
            }
        };
        Self::from_layer(file.merge(ConfigLayer::from_env()?))
    }

    /// Apply defaults to `layer` and validate it.
    pub fn from_layer(layer: ConfigLayer) -> Result<Self, ConfigError> {
        Ok(Self {
            websocket_url: layer
                .websocket_url
                .ok_or(ConfigError::Missing("websocketUrl"))?,
            token: layer.token.ok_or(ConfigError::Missing("token"))?,
            bot_name: layer.bot_name.ok_or(ConfigError::Missing("botName"))?,
            tick_safety_margin: layer
                .tick_safety_margin_ms
                .map_or(DEFAULT_SAFETY_MARGIN, Duration::from_millis),
            team_ai_log_level: parse_level("teamAiLogLevel", layer.team_ai_log_level)?,
            wrapper_log_level: parse_level("wrapperLogLevel", layer.wrapper_log_level)?,
        })
    }

    /// Scheduler settings derived from this configuration.
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            safety_margin: self.tick_safety_margin,
        }
    }

    /// Credentials presented on connect.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.token.clone(), self.bot_name.clone())
    }
}

fn parse_level(key: &'static str, value: Option<String>) -> Result<LevelFilter, ConfigError> {
    match value {
        None => Ok(LevelFilter::INFO),
        Some(raw) => LevelFilter::from_str(raw.trim())
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
