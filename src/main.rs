use std::sync::Arc;

use tracing::{error, info};

use corkboard::{AppState, BoardService, Config, PageTemplates, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let mut config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    if let Err(e) = config.apply_env_overrides() {
        eprintln!("Invalid environment override: {e}");
        std::process::exit(1);
    }
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = corkboard::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        corkboard::logging::init_console_only(&config.logging.level);
    }

    info!("Corkboard - a minimal web message board");

    if let Err(e) = run(config).await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> corkboard::Result<()> {
    let store = corkboard::store::open(&config.store).await?;
    let templates = PageTemplates::load_dir(&config.templates.path)?;

    let state = AppState::new(
        BoardService::new(store),
        Arc::new(templates),
        config.server.timezone.clone(),
    );

    WebServer::new(&config.server, state)?.run().await
}
