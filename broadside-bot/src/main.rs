use broadside_bot::{BotConfig, BotError, logging, run};
use std::path::Path;

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("broadside-bot error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), BotError> {
    let config_path = std::env::args().nth(1);
    if let Some("--help" | "-h") = config_path.as_deref() {
        print_usage();
        return Ok(());
    }

    let config = BotConfig::load(config_path.as_deref().map(Path::new))?;
    logging::init(&config).map_err(|e| BotError::Logging(e.to_string()))?;
    run(config).await
}

fn print_usage() {
    println!("broadside-bot [CONFIG_JSON]");
    println!();
    println!("Settings come from CONFIG_JSON (default ./config.json), then from");
    println!("BROADSIDE_WEBSOCKET_URL, BROADSIDE_TOKEN, BROADSIDE_BOT_NAME,");
    println!("BROADSIDE_TICK_SAFETY_MARGIN_MS, BROADSIDE_TEAM_AI_LOG_LEVEL and");
    println!("BROADSIDE_WRAPPER_LOG_LEVEL. RUST_LOG overrides both log levels.");
}
