//! cellmap - table structure inference and cell-to-field mapping for
//! detected form field candidates.

pub mod api;
pub mod candidate;
pub mod error;
pub mod fields;
pub mod geometry;
pub mod table;

// Re-export high_level for convenience
pub use api::high_level;

pub use candidate::FieldCandidate;
pub use error::{CellMapError, Result};
