use hoopstats::{
    router,
    stats::{InMemoryStatRepository, PostgresStatRepository, StatRepository},
    AppConfig, AppState,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hoopstats=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting box-score stats service");

    let config = AppConfig::from_env();

    let stat_repository: Arc<dyn StatRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = match PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await
            {
                Ok(pool) => pool,
                Err(e) => {
                    error!(error = %e, "Failed to connect to the database");
                    std::process::exit(1);
                }
            };
            info!(max_connections = config.max_connections, "Connected to PostgreSQL");
            Arc::new(PostgresStatRepository::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory repository");
            Arc::new(InMemoryStatRepository::new())
        }
    };

    let app = router(AppState::new(stat_repository));

    let listener = match tokio::net::TcpListener::bind(config.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, address = %config.bind_address, "Failed to bind listener");
            std::process::exit(1);
        }
    };
    info!(address = %config.bind_address, "Server listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server stopped with error");
        std::process::exit(1);
    }
}
