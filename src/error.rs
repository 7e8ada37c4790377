#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Remote API error {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cache I/O error: {0}")]
    CacheIo(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// True for failures raised after a local mutation has already been
    /// committed (remote transport, non-success status). These are reported
    /// and logged, never rolled back.
    pub fn is_soft(&self) -> bool {
        matches!(self, CoreError::Remote { .. } | CoreError::Http(_))
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
