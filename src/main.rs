//! Evently API server
//!
//! Main application entry point

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use evently::{
    config::Settings,
    database::{self, DatabaseService, PoolConfig},
    handlers,
    services::{JobQueue, JobWorker, Scheduler, ServiceFactory},
    utils::logging,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes buffered file output on exit
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting Evently API server...");

    // Initialize database connection
    info!("Connecting to database...");
    let pool = database::create_pool(&PoolConfig::from_settings(&settings.database)).await?;

    // Run database migrations
    database::run_migrations(&pool).await?;

    let db = DatabaseService::new(pool.clone());

    // Start the job queue workers and the periodic sweeps
    let (queue, receivers) = JobQueue::new();
    JobWorker::new(db.clone(), queue.clone()).spawn(receivers);
    Scheduler::new(queue.clone(), settings.scheduler.clone()).spawn();

    // Initialize services
    let services = ServiceFactory::new(db.clone(), queue);

    let state = AppState {
        settings: settings.clone(),
        pool,
        db,
        services,
    };

    let app = handlers::build_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Evently API server has been shut down.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
