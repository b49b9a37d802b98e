//! Gatherly
//!
//! Main application entry point

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use gatherly::{
    config::Settings,
    database::{connection::create_pool, run_migrations, DatabaseService},
    handlers::{create_router, AppState},
    services::{RedisService, ServiceFactory},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must live for the whole process
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting Gatherly...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = gatherly::database::connection::DatabaseConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        acquire_timeout: std::time::Duration::from_secs(30),
        idle_timeout: Some(std::time::Duration::from_secs(600)),
        max_lifetime: Some(std::time::Duration::from_secs(1800)),
    };
    let db_pool = create_pool(&db_config).await?;

    // Run database migrations
    run_migrations(&db_pool).await?;

    // Initialize Redis connection
    info!("Connecting to Redis...");
    let redis_service = RedisService::new(settings.redis.clone()).await?;

    // Initialize services
    info!("Initializing services...");
    let database_service = DatabaseService::new(db_pool.clone());
    let services = ServiceFactory::new(settings.clone(), database_service, redis_service)?;

    let state = AppState {
        services: Arc::new(services),
        pool: db_pool,
    };

    let app = create_router(state);

    let host: IpAddr = settings.server.host.parse()?;
    let addr = SocketAddr::new(host, settings.server.port);
    info!("Gatherly listening on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    info!("Gatherly has shut down.");

    Ok(())
}
