use thiserror::Error;

use crate::validation::ValidationFailure;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Stored record is invalid: {0}")]
    CorruptRecord(String),

    #[error("Score engine error: {0}")]
    Engine(String),

    #[error("Score engine produced an invalid record: {0}")]
    InvalidEngineOutput(#[from] ValidationFailure),
}

pub type Result<T> = std::result::Result<T, ScoringError>;

impl ScoringError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScoringError::NotFound)
    }
}
