//! PostgreSQL persistence layer for the regulations pipeline.
//!
//! - [`models`] — `FromRow` entity structs and insert DTOs.
//! - [`repositories`] — zero-sized repository structs with async methods
//!   taking an executor as the first argument.
//!
//! Schema lives in `db/migrations/` and is applied idempotently before any
//! write (the worker's ensure-schema step).

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Cheap connectivity probe.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
