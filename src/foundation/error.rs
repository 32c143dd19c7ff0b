/// Convenience result type used across Shoreline.
pub type ShorelineResult<T> = Result<T, ShorelineError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Most of these never reach a caller: the engine recovers from configuration, colour and
/// per-frame failures in place and only logs them.
#[derive(thiserror::Error, Debug)]
pub enum ShorelineError {
    /// Invalid user-provided data (sizes, numeric inputs).
    #[error("validation error: {0}")]
    Validation(String),

    /// A serialized configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// A colour specification could not be resolved.
    #[error("color error: {0}")]
    Color(String),

    /// The background execution strategy could not be started.
    #[error("initialization error: {0}")]
    Initialization(String),

    /// A single frame failed to draw.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShorelineError {
    /// Build a [`ShorelineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShorelineError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ShorelineError::Color`] value.
    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    /// Build a [`ShorelineError::Initialization`] value.
    pub fn initialization(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    /// Build a [`ShorelineError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
