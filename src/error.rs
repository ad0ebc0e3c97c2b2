use thiserror::Error;

#[derive(Error, Debug)]
pub enum OnboarderError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed record field: {0}")]
    Record(String),
}

pub type Result<T> = std::result::Result<T, OnboarderError>;
