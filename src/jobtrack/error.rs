use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum JobtrackError {
    #[error("{0}")]
    Validation(String),

    #[error("Application not found: {0}")]
    NotFound(Uuid),

    /// A freshly generated id already exists in the collection. Never expected
    /// with v4 ids; callers treat it as fatal.
    #[error("Duplicate application id generated: {0}")]
    IdCollision(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl JobtrackError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, JobtrackError>;
