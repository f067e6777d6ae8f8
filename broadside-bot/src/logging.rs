//! Log setup.
//!
//! Two knobs, one per audience: the runtime ("wrapper") crates and the
//! team AI. `RUST_LOG`, when set, replaces both.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::config::BotConfig;

/// Target used by the team AI's log events.
pub const TEAM_AI_TARGET: &str = "team_ai";

/// Crates whose events follow the wrapper log level.
const WRAPPER_TARGETS: &[&str] = &["broadside_runtime", "broadside_proto", "broadside_bot"];

/// Filter directives for `config`, e.g.
/// `warn,broadside_runtime=info,broadside_proto=info,broadside_bot=info,team_ai=debug`.
///
/// Everything outside the named targets is limited to `warn`.
pub fn directives(config: &BotConfig) -> String {
    let wrapper = level_name(config.wrapper_log_level);
    let mut directives = vec!["warn".to_string()];
    directives.extend(
        WRAPPER_TARGETS
            .iter()
            .map(|target| format!("{target}={wrapper}")),
    );
    directives.push(format!(
        "{TEAM_AI_TARGET}={}",
        level_name(config.team_ai_log_level)
    ));
    directives.join(",")
}

fn level_name(level: LevelFilter) -> String {
    level.to_string().to_lowercase()
}

/// The filter to install: `RUST_LOG` if set and valid, otherwise
/// [`directives`].
pub fn filter(config: &BotConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(config)))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &BotConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_target(true)
        .try_init()
}
