mod app;
mod config;
mod db;
mod domain;
mod error;
mod logging;
mod middleware;
mod routes;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        database_url = %settings.database_url,
        "Starting orgprofile backend"
    );

    // Create database pool (provisions the database file on first run)
    let pool = db::create_pool(&settings).await?;

    // Ensure the profiles table exists before serving traffic
    db::init_schema(&pool).await?;

    // Create application state
    let state = app::AppState::new(pool, settings.clone());

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
