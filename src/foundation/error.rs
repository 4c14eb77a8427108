/// Convenience result type used across lbmprep.
pub type SetupResult<T> = Result<T, SetupError>;

/// Top-level error taxonomy used by the setup APIs.
#[derive(thiserror::Error, Debug)]
pub enum SetupError {
    /// Invalid configuration or legend data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while decoding or accessing the domain bitmap.
    #[error("image error: {0}")]
    Image(String),

    /// Violations of the binary wire contract while encoding or decoding.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SetupError {
    /// Build a [`SetupError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SetupError::Image`] value.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Build a [`SetupError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
