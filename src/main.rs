use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use course_api::config::{self, AppConfig};
use course_api::database::{DatabaseManager, MemoryStore, PgStore};
use course_api::{build_app, AppState};

#[derive(Debug, Parser)]
#[command(name = "course-api", version, about = "REST API for users and the courses they own")]
struct Cli {
    /// Address to bind (overrides SERVER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides SERVER_PORT / PORT)
    #[arg(long, short)]
    port: Option<u16>,

    /// Serve from an in-process store instead of Postgres
    #[arg(long)]
    in_memory: bool,

    /// Do not apply database migrations at startup
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL and friends are picked up
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("course_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config: AppConfig = config::config().clone();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    tracing::info!("Starting course API in {:?} mode", config.environment);

    let state = if cli.in_memory {
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        AppState::new(Arc::new(MemoryStore::new()), config.clone())
    } else {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        if config.database.run_migrations && !cli.skip_migrations {
            DatabaseManager::migrate(&pool)
                .await
                .context("failed to apply migrations")?;
        }
        AppState::new(Arc::new(PgStore::new(pool)), config.clone())
    };

    let app = build_app(state);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Course API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
