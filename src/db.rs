//! Database pool management and schema bootstrap

use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Settings;

/// Create a SQLite connection pool, provisioning the database file if absent
pub async fn create_pool(settings: &Settings) -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str(&settings.database_url)
        .context("Invalid DATABASE_URL")?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.database_max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .connect_with(connect_options)
        .await
        .context("Failed to open SQLite database")?;

    tracing::info!(
        max_connections = settings.database_max_connections,
        "Database connection pool established"
    );

    Ok(pool)
}

/// Create the profiles table if it does not exist yet. Idempotent.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            url TEXT NOT NULL,
            logo TEXT NOT NULL,
            created TEXT NOT NULL,
            updated TEXT NOT NULL,
            address TEXT NOT NULL,
            email TEXT NOT NULL,
            domains TEXT NOT NULL,
            office_phone TEXT NOT NULL,
            fax_phone TEXT NOT NULL,
            twitter TEXT NOT NULL,
            facebook TEXT NOT NULL,
            linkedin TEXT NOT NULL,
            instagram TEXT NOT NULL,
            pinterest TEXT NOT NULL,
            tiktok TEXT NOT NULL,
            ein TEXT NOT NULL,
            is_default BOOLEAN NOT NULL,
            is_active BOOLEAN NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create users table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_name ON users (name)")
        .execute(pool)
        .await
        .context("Failed to create users name index")?;

    tracing::debug!("Schema bootstrap complete");

    Ok(())
}

/// Lightweight health check for database connectivity
pub async fn health_check(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
}
