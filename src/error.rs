use thiserror::Error;

use crate::text::TextEntryKind;

/// Errors produced by the canvas session and its I/O helpers
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load font: {0}")]
    Font(String),

    #[error("Invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid font size {0}")]
    InvalidFontSize(f32),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Result type for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur during text entry state transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// Attempted to transition between incompatible states
    #[error("Cannot transition text entry from {from:?} to {to:?}")]
    InvalidStateTransition {
        from: TextEntryKind,
        to: TextEntryKind,
    },
}
