use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

mod api;
mod config;
mod db;
mod error;
mod messages;
mod openai;
mod prompts;
mod recipe;
mod service;

use crate::config::load_config;
use crate::db::Database;
use crate::openai::OpenAiClient;
use crate::service::CabinetService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    init_logging();

    info!("Starting CabiNet service v{}", env!("CARGO_PKG_VERSION"));

    // Config file, CABINET__* overrides, then OPENAI_API_KEY
    let config = Arc::new(load_config()?);

    info!(
        host = %config.server.host,
        port = config.server.port,
        parse_strategy = ?config.recipe.parse_strategy,
        "Configuration loaded"
    );

    // Ensure data directory exists
    std::fs::create_dir_all(&config.storage.data_dir)?;

    // Initialize database
    let db_path = config.storage.data_dir.join("cabinet.db");
    let db = Arc::new(Database::open(&db_path)?);
    info!(path = %db_path.display(), "Database initialized");

    // Chat-completion backend
    let backend = Arc::new(OpenAiClient::new(config.openai.clone())?);

    // Initialize the service
    let service = Arc::new(CabinetService::new(config.clone(), db, backend));

    // Build the router
    let app = api::router(service);

    // Start the server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let format = fmt::format()
        .with_target(true)
        .with_thread_ids(true)
        .compact();

    // Use RUST_LOG if set, otherwise default to info level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cabinet_service=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().event_format(format))
        .with(filter)
        .init();
}
