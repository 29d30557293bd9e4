use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
