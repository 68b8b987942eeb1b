mod logging;

use dotenvy::dotenv;
use logging::{init_logging, RedactionPatterns};
use sightseer_core::config::BackendSettings;
use sightseer_transport_telegram::config::{BotSettings, TelegramSettings};
use sightseer_transport_telegram::runner::run_bot;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Before logging, so nothing is written unredacted
    let patterns = Arc::new(RedactionPatterns::new().map_err(|e| {
        eprintln!("Failed to compile regex patterns: {e}");
        e
    })?);

    init_logging(patterns);

    info!("Starting Sightseer TG Bot...");

    let settings = init_settings();

    run_bot(settings).await;

    Ok(())
}

fn init_settings() -> Arc<BotSettings> {
    let backend_settings = match BackendSettings::new() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load backend configuration: {}", e);
            std::process::exit(1);
        }
    };
    let telegram_settings = match TelegramSettings::new() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load telegram configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Configuration loaded successfully.");
    Arc::new(BotSettings::new(backend_settings, telegram_settings))
}
