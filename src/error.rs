//! Error types for uvmask.
//!
//! Structural problems with the input mesh are reported as errors. Per-element
//! anomalies (zero-area triangles, stale island indices, mismatched base color
//! arrays) are absorbed where they occur and never show up here.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MaskError`].
pub type Result<T> = std::result::Result<T, MaskError>;

/// Errors that can occur while analyzing meshes or producing masks.
#[derive(Error, Debug)]
pub enum MaskError {
    /// The mesh cannot be read by the host, or its arrays are inconsistent.
    #[error("invalid mesh state: {0}")]
    InvalidMeshState(String),

    /// The requested UV channel holds no coordinates.
    #[error("mesh has no UV data in channel {channel}")]
    MissingUvChannel {
        /// The (clamped) channel that was requested.
        channel: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding or decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Error loading a mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving to file.
    #[error("failed to save {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },
}

impl MaskError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MaskError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create an invalid mesh state error.
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        MaskError::InvalidMeshState(message.into())
    }
}
