//! Table structure inference over field candidates.
//!
//! Candidates are grouped by proximity, each group is banded into rows and
//! columns, and groups that form a regular grid become `DetectedTable`s with
//! a header verdict for row 0.

mod clustering;
mod finder;
mod grid;
mod grouping;
mod header;
mod types;

// Re-export public types
pub use types::{
    Cell, DetectedTable, GridAnalysis, GridRejection, GroupingStrategy, ProximityMeasure,
    TableSettings,
};

// Re-export public API functions
pub use clustering::{band_anchors, band_index, reading_order};
pub use finder::{detect_tables, standalone_candidates};
pub use grid::analyze_grid;
pub use grouping::group_candidates;
pub use header::{HeaderRule, header_rules, is_header_row, matching_header_rule};

pub(crate) use finder::detect_tables_numbered;
