//! Lending server maintenance binary
//!
//! Opens the configured store, applies migrations and reports the catalog size.

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lending_server::{
    config::{AppConfig, StoreBackend},
    repository::Repository,
    services::Services,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("lending_server={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting lending server v{}", env!("CARGO_PKG_VERSION"));

    let repository = match config.store.backend {
        StoreBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database migrations completed");

            Repository::new(pool)
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Repository::in_memory()
        }
    };

    let services = Services::new(repository, &config.loans);
    tracing::info!("Loan cascade mode: {:?}", config.loans.on_parent_delete);

    let summary = services.summary().await?;
    tracing::info!(
        "Catalog: {} book(s), {} member(s), {} loan(s) ({} open)",
        summary.books,
        summary.members,
        summary.loans,
        summary.open_loans
    );

    Ok(())
}
