//! Error types for sky pixel operations.

/// Result type for sky pixel operations
pub type SkyPixResult<T> = Result<T, SkyPixError>;

/// Error type for sky pixel operations
#[derive(Debug, thiserror::Error)]
pub enum SkyPixError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Numeric error: {0}")]
    NumericError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SkyPixError {
    /// True for errors caused by the caller's input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SkyPixError::InvalidArgument(_)
                | SkyPixError::NumericError(_)
                | SkyPixError::ParseError(_)
        )
    }
}
