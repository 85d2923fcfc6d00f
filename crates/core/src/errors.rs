use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown reference: {0}")]
    UnknownReference(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type StudioResult<T> = Result<T, StudioError>;
