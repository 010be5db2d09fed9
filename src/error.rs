//! Error types for soundlab
//!
//! All fallible operations return [`SoundError`], so constructors, codecs,
//! generators and transforms share one taxonomy with recovery hints.

use thiserror::Error;

/// Result type alias using SoundError
pub type Result<T> = std::result::Result<T, SoundError>;

/// All possible errors in soundlab
#[derive(Error, Debug)]
pub enum SoundError {
    // Construction errors
    #[error("Shape mismatch: {details}")]
    ShapeMismatch { details: String },

    #[error("Missing required parameter: {parameter}")]
    MissingParameter { parameter: &'static str },

    // Codec errors
    #[error("Failed to decode audio file: {path}")]
    DecodeError {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Failed to encode audio file: {path}")]
    EncodeError {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Unsupported audio format: {details}")]
    UnsupportedFormat { details: String },

    // Parameter errors
    #[error("Invalid parameter: {param} = {value} ({reason})")]
    InvalidParameter {
        param: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Unknown {kind}: {name}")]
    UnknownName { kind: &'static str, name: String },

    // Generic I/O
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SoundError {
    pub(crate) fn shape(details: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            details: details.into(),
        }
    }

    pub(crate) fn invalid(param: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            param,
            value,
            reason,
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ShapeMismatch { .. } => "SHAPE_MISMATCH",
            Self::MissingParameter { .. } => "MISSING_PARAMETER",
            Self::DecodeError { .. } => "DECODE_ERROR",
            Self::EncodeError { .. } => "ENCODE_ERROR",
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::InvalidParameter { .. } => "INVALID_PARAMETER",
            Self::UnknownName { .. } => "UNKNOWN_NAME",
            Self::IoError(_) => "IO_ERROR",
            Self::SerializationError(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::ShapeMismatch { .. } => {
                "Make sure all inputs have the same number of samples and the same samplerate"
            }
            Self::MissingParameter { .. } => "Pass a samplerate when building a sound from arrays",
            Self::DecodeError { .. } => "Check that the file exists and is a valid PCM WAV file",
            Self::EncodeError { .. } => "Check that the target directory exists and is writable",
            Self::UnsupportedFormat { .. } => "Use 8/16/24/32-bit integer or 32-bit float WAV",
            Self::InvalidParameter { .. } => "Adjust the parameter to be within the valid range",
            Self::UnknownName { .. } => "Check the spelling against the documented names",
            _ => "Check the error details and try again",
        }
    }
}
