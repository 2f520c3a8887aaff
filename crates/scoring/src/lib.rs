pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::error::Result;

/// Connection pool for the Postgres-backed score store
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}
