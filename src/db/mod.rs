// Database module - provides data access layer

use std::str::FromStr;

use color_eyre::{
    eyre::{ensure, OptionExt},
    Result,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

// Re-export models for convenience
pub mod models;
pub use models::*;

// Internal modules
mod admin;
mod choice;
mod migrations;
mod question;
mod quiz;
mod result;
mod schema;
mod scoring;

// Main database handle
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Connect, create any missing tables in their current shape, then evolve
    /// tables left behind by older releases.
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self::from_pool(pool).await?;
        schema::create_schema(&db.pool).await?;
        db.evolve().await?;

        tracing::info!("database connection has been verified");
        Ok(db)
    }

    /// Wrap an existing pool without touching the schema.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let one: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_optional(&pool)
            .await?
            .ok_or_eyre("connection check failed")?;
        ensure!(one == 1, "connection check returned {one}");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
