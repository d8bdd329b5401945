use thiserror::Error;

/// Application-wide error types for the Webquiz backend.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credentials did not match.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint was violated (e.g. duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Process configuration is missing or invalid.
    #[error("Config error: {0}")]
    Config(String),

    /// Password hashing or verification failed.
    #[error("Hash error: {0}")]
    Hash(String),

    /// Token signing or decoding failed.
    #[error("Token error: {0}")]
    Token(String),
}

impl AppError {
    /// Returns true if this error maps to a client-side (4xx) status.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::Unauthorized(_)
                | AppError::NotFound(_)
                | AppError::Conflict(_)
        )
    }
}
