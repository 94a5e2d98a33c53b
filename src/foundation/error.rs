/// Result alias used across the crate.
pub type ScrollcueResult<T> = Result<T, ScrollcueError>;

/// Construction-time failures.
///
/// Runtime anomalies (an element that is not in the document) never surface here; they are
/// skipped where they occur.
#[derive(thiserror::Error, Debug)]
pub enum ScrollcueError {
    /// Invalid section registry or other structural input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid timeline, stage, trigger or ease definition.
    #[error("animation error: {0}")]
    Animation(String),

    /// Configuration that could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollcueError {
    /// Build a [`ScrollcueError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollcueError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ScrollcueError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ScrollcueError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
