use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] agenda_service::error::ServiceError),

    #[error(transparent)]
    CoreError(#[from] agenda_core::error::CoreError),

    #[error("Output error: {0}")]
    OutputError(#[from] serde_json::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
