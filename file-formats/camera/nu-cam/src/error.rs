use std::io;
use thiserror::Error;

/// Error types for camera export parsing and transform conversion
#[derive(Error, Debug)]
pub enum NuCamError {
    /// I/O error while reading an export document
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed document shape, numeric field or frame label
    #[error("Parse error in {context}: {message}")]
    Parse { context: String, message: String },

    /// Input parsed but violates an invariant (duplicate frame, zero scale, bad permutation)
    #[error("Validation error in {context}: {message}")]
    Validation { context: String, message: String },

    /// A matrix could not be decomposed into translation, rotation and scale
    #[error("Decomposition error: {0}")]
    Decomposition(#[from] DecompositionError),

    /// The requested track is not present in the document
    #[error("Track not found: {0}")]
    MissingTrack(String),

    /// The requested reference actor is not present in the document
    #[error("Unknown actor: {0}")]
    UnknownActor(String),

    /// The reference actor exists but its entry could not be read
    #[error("Reference actor '{actor}' is unusable: {reason}")]
    InvalidActor { actor: String, reason: String },

    /// Raised by scene-graph implementations
    #[error("Scene graph error: {0}")]
    SceneGraph(String),

    /// A scene-graph call failed while emitting an animation frame
    #[error("Failed to emit frame {frame} at time {time}: {source}")]
    FrameEmission {
        frame: usize,
        time: f64,
        source: Box<NuCamError>,
    },
}

/// Reasons a matrix has no proper translation/rotation/scale decomposition
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DecompositionError {
    /// The basis has a negative determinant; a rotation would have to mirror
    #[error("matrix contains a reflection (determinant {determinant})")]
    Reflection { determinant: f64 },

    /// A basis axis has zero length
    #[error("basis axis {axis} has zero length")]
    Singular { axis: usize },
}

impl NuCamError {
    pub(crate) fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    pub(crate) fn validation(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Result type using NuCamError
pub type Result<T> = std::result::Result<T, NuCamError>;
