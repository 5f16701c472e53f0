//! Error types for cellmap.
//!
//! The detection stages themselves never fail. Errors are raised only while
//! validating input candidates and settings at the library boundary.

use thiserror::Error;

/// Primary error type for candidate and settings validation.
#[derive(Error, Debug)]
pub enum CellMapError {
    #[error("candidate {id}: box must have positive size, got {width}x{height}")]
    InvalidGeometry { id: String, width: f64, height: f64 },

    #[error("candidate {id}: coordinates must be finite")]
    NonFiniteCoordinate { id: String },

    #[error("duplicate candidate id: {0}")]
    DuplicateId(String),

    #[error("candidate {0} has neither bbox nor position")]
    MissingGeometry(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias for CellMapError.
pub type Result<T> = std::result::Result<T, CellMapError>;
