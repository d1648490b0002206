use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    CoreError(#[from] agenda_core::error::CoreError),

    #[error(transparent)]
    EventError(#[from] agenda_calendar::error::EventError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
