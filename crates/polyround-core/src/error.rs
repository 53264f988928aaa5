//! Error handling for Polyround
//!
//! Provides error types for every layer of the editor core:
//! - Restore errors (snapshots that cannot be applied to the live shape)
//! - Geometry errors (shape parameters outside their legal range)
//! - Configuration errors (loading, saving and validating settings)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Restore error type
///
/// Raised when a snapshot cannot be applied to the live shape. A failed
/// restore never changes the live shape or the history cursor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RestoreError {
    /// The snapshot could not be decoded
    #[error("Malformed snapshot: {reason}")]
    Malformed {
        /// The reason decoding failed.
        reason: String,
    },

    /// The snapshot decoded but describes a shape this surface cannot hold
    #[error("Incompatible snapshot: {reason}")]
    Incompatible {
        /// The reason the snapshot was rejected.
        reason: String,
    },
}

/// Geometry error type
///
/// Represents shape parameters outside their legal range. Produced by the
/// validating constructors only; the outline builder treats such input as a
/// contract violation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Fewer than three vertices
    #[error("A polygon needs at least 3 vertices, got {num_verts}")]
    TooFewVertices {
        /// The requested vertex count.
        num_verts: u32,
    },

    /// More vertices than the configured maximum
    #[error("Vertex count {num_verts} exceeds the maximum of {max_num_verts}")]
    TooManyVertices {
        /// The requested vertex count.
        num_verts: u32,
        /// The configured maximum.
        max_num_verts: u32,
    },

    /// Negative corner radius
    #[error("Corner radius must not be negative, got {radius}")]
    NegativeRadius {
        /// The requested radius.
        radius: f64,
    },

    /// Corner radius at or beyond half the shape size
    #[error("Corner radius {radius} must be below {limit}")]
    RadiusTooLarge {
        /// The requested radius.
        radius: f64,
        /// The exclusive upper bound (half the shape size).
        limit: f64,
    },

    /// Shape size that differs from the fixed document size
    #[error("Shape size {size} differs from document size {document_size}")]
    SizeMismatch {
        /// The size of the offered shape.
        size: f64,
        /// The size every shape in the document has.
        document_size: f64,
    },

    /// Shape size that is not a positive finite number
    #[error("Shape size must be positive and finite, got {size}")]
    InvalidSize {
        /// The requested size.
        size: f64,
    },
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A configuration value is out of valid range.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange {
        /// The offending key.
        key: String,
        /// The rejected value, rendered for display.
        value: String,
    },

    /// The configuration file is corrupted or malformed.
    #[error("Corrupted configuration: {0}")]
    Corrupted(String),
}

/// Main error type for Polyround
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Restore error
    #[error(transparent)]
    Restore(#[from] RestoreError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a restore error
    pub fn is_restore_error(&self) -> bool {
        matches!(self, Error::Restore(_))
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
