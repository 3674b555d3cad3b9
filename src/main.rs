use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use ruzhi_review::{
    AppState, build_router,
    config::Config,
    data::repositories::{self, CardRepository, InMemoryCardRepository, SqliteCardRepository},
    features::srs::Scheduler,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Card storage
    let repository: Arc<dyn CardRepository> = if config.uses_memory_store() {
        log::warn!("DATABASE_URL=memory: review progress will be lost on restart");
        Arc::new(InMemoryCardRepository::new())
    } else {
        let pool = repositories::connect(&config.database_url, config.pool_size)
            .with_context(|| format!("Failed to open database {}", config.database_url))?;
        info!("Using SQLite card store at {}", config.database_url);
        Arc::new(SqliteCardRepository::new(pool))
    };

    let scheduler = Scheduler::new(repository).with_max_due_limit(config.max_due_limit);
    let app = build_router(AppState::new(scheduler));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("Review service running on http://{}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
