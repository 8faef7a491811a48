//! Engine error types.

use thiserror::Error;

/// Errors produced while invoking the lint engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine rejected its configuration.
    #[error("Stylelint configuration error: {0}")]
    Configuration(String),

    /// The engine failed for any other reason.
    #[error("Stylelint invocation failed: {0}")]
    Invocation(String),

    /// An engine request or response could not be (de)serialized.
    #[error("engine serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The engine process could not be driven.
    #[error("engine I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Creates an invocation error.
    pub fn invocation(message: impl Into<String>) -> Self {
        Self::Invocation(message.into())
    }

    /// Classifies an error message reported by the engine itself.
    ///
    /// Stylelint signals a missing or empty configuration with two known
    /// messages; those become [`EngineError::Configuration`] so callers
    /// branch on the variant rather than on text.
    pub fn from_engine_message(message: impl Into<String>) -> Self {
        let message = message.into();

        if message.starts_with("No configuration provided for")
            || message.contains("No rules found within configuration")
        {
            Self::Configuration(message)
        } else {
            Self::Invocation(message)
        }
    }

    /// Returns `true` for configuration errors eligible for the
    /// empty-rules fallback.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
