use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SeedError {
    #[error("Password generation error: {0}")]
    GenerationError(String),

    #[error("Invalid secret key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] figment::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}
