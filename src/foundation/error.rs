/// Convenience result type used across Sanctuary.
pub type SanctuaryResult<T> = Result<T, SanctuaryError>;

/// Top-level error taxonomy used by the choreography, engine, and playback APIs.
///
/// Decorative failures (a missing trigger element, an unplayable source, a
/// failed stream) never reach callers through this type; they are logged and
/// the affected flourish is skipped.
#[derive(thiserror::Error, Debug)]
pub enum SanctuaryError {
    /// Invalid user-provided configuration or content data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building or sampling animation timelines.
    #[error("animation error: {0}")]
    Animation(String),

    /// Malformed trigger positions or engine misuse.
    #[error("trigger error: {0}")]
    Trigger(String),

    /// Errors raised by a playback host or adaptive loader.
    #[error("playback error: {0}")]
    Playback(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SanctuaryError {
    /// Build a [`SanctuaryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SanctuaryError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`SanctuaryError::Trigger`] value.
    pub fn trigger(msg: impl Into<String>) -> Self {
        Self::Trigger(msg.into())
    }

    /// Build a [`SanctuaryError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`SanctuaryError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
