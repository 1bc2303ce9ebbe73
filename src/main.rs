use anyhow::Context;
use spotless::bootstrap;
use spotless::config::Config;
use spotless::database::Database;
use spotless::api::router::build_router;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spotless=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Install drivers for AnyPool
    sqlx::any::install_default_drivers();

    // Initialize database connection
    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Database connection established");

    // Run migrations
    db.run_migrations()
        .await
        .context("failed to run migrations")?;
    tracing::info!("Database migrations applied");

    // Build application state
    let state = bootstrap::build_app_state(db.clone(), &config);

    // Start the outbox processor in the background
    bootstrap::spawn_outbox_processor(db, &config);

    // Build router
    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
