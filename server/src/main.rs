mod config;
mod service;

use arcadia_store::{
    Database, ScoreLog, SqliteCatalogRepository, SqliteScoreRepository, CATALOG_MIGRATIONS,
    SCORES_MIGRATIONS,
};
use service::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with span durations
    use tracing_subscriber::fmt::format::FmtSpan;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!("Starting arcadia score server");

    let data_dir = config::get_data_dir();
    let bind_addr = config::get_bind_addr();
    let score_log_path = config::get_score_log_path(&data_dir);

    tracing::info!("Using data directory: {}", data_dir.display());

    // Open both stores up front so migrations run before the first request.
    let catalog_db =
        Database::open(&config::catalog_db_path(&data_dir), &CATALOG_MIGRATIONS).await?;
    let scores_db = Database::open(&config::scores_db_path(&data_dir), &SCORES_MIGRATIONS).await?;
    let score_log = ScoreLog::open(&score_log_path)?;
    tracing::info!("Using score log: {}", score_log.path().display());

    let state = AppState::new(
        SqliteCatalogRepository::new(catalog_db.pool().clone()),
        SqliteScoreRepository::new(scores_db.pool().clone()),
        score_log,
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, service::router(state)).await?;

    Ok(())
}
