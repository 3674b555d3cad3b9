use diesel::result::Error as DieselError;
use serde_json::Error as JsonError;
use thiserror::Error;

// Errors raised by the review scheduler and its storage
#[derive(Error, Debug)]
pub enum SrsError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Card not found: {0}")]
    NotFound(String),
    #[error("Database error")]
    DatabaseError(#[from] DieselError),
    #[error("Connection pool error: {0}")]
    PoolError(String),
    #[error("Serialization error")]
    SerializationError(#[from] JsonError),
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

pub type SrsResult<T> = Result<T, SrsError>;
