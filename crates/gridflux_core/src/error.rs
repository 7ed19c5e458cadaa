use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GridError {
    /// True for errors the user can fix by correcting their input.
    pub fn is_validation(&self) -> bool {
        matches!(self, GridError::Validation(_))
    }

    /// True for errors where retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GridError::Persistence(_) | GridError::IoError(_))
    }
}
