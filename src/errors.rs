//! Error types for the measure editor
//!
//! Overflowing insertions and out-of-range placements are not errors; they are
//! reported through `InsertOutcome` and `EventOutcome`. Everything here aborts
//! the operation that raised it without touching editor state.

use thiserror::Error;

/// Top-level editor error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// Duration symbol is not in the duration table
    #[error("Invalid duration symbol: '{0}'")]
    InvalidDuration(String),

    /// Pitch token could not be parsed (expected e.g. "c/4")
    #[error("Invalid pitch token: '{0}'")]
    InvalidPitch(String),

    /// Configuration failed to parse or validate
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal consistency failure (indicates a bug or a bad meter/grid)
    #[error("Measure invariant violated: {0}")]
    InvariantViolation(String),

    /// Rendering collaborator failed or returned unusable geometry
    #[error("Rendering failed: {0}")]
    Render(String),
}

impl EditorError {
    /// Build an invariant violation and log it at error level.
    ///
    /// These are never expected at runtime, so they are always logged where raised.
    pub fn invariant(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        log::error!("invariant violation: {}", msg);
        EditorError::InvariantViolation(msg)
    }
}

pub type EditorResult<T> = Result<T, EditorError>;
