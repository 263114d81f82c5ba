use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Malformed or out-of-range input. Never retried, never partially applied.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced player, game or team does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any failure at the storage boundary, passed through unchanged.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl StatsError {
    pub fn validation(message: impl Into<String>) -> Self {
        StatsError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        StatsError::NotFound(message.into())
    }

    /// The bare reason, without the variant prefix added by `Display`.
    pub fn message(&self) -> &str {
        match self {
            StatsError::Validation(msg) | StatsError::NotFound(msg) | StatsError::Repository(msg) => {
                msg
            }
        }
    }
}

impl From<sqlx::Error> for StatsError {
    fn from(err: sqlx::Error) -> Self {
        StatsError::Repository(err.to_string())
    }
}
