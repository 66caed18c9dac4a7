/// Convenience result type used across the crate.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Top-level error taxonomy for the frame and illustration pipelines.
#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    /// Invalid user-provided inputs: directories, seeds, windows or settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures while locating, spawning or running `ffmpeg`.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanvasError {
    /// Build a [`CanvasError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CanvasError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
