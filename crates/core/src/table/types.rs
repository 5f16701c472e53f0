//! Table detection types and settings.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{CellMapError, Result};
use crate::geometry::{BBox, Point};

// Default constants
pub(crate) const DEFAULT_PROXIMITY_THRESHOLD: f64 = 100.0;
pub(crate) const DEFAULT_MIN_GROUP_SIZE: usize = 4;
pub(crate) const DEFAULT_ROW_SORT_TOLERANCE: f64 = 20.0;
pub(crate) const DEFAULT_BAND_TOLERANCE: f64 = 15.0;
pub(crate) const DEFAULT_MIN_FILL_RATIO: f64 = 0.8;
pub(crate) const DEFAULT_HEADER_MIN_LABEL_LEN: usize = 10;
pub(crate) const DEFAULT_TABLE_NAME_PREFIX: &str = "Tabela";

// Key type for ordered float sets
pub(crate) type KeyF64 = OrderedFloat<f64>;

pub(crate) fn key_f64(v: f64) -> KeyF64 {
    OrderedFloat(v)
}

/// How candidate regions are formed from pairwise proximity.
///
/// Defaults to `ConnectedComponents`. Paired with the default
/// [`ProximityMeasure::Gap`] it recovers grids whose columns sit further
/// apart than the threshold at their corners. The classic behaviour, one
/// expansion over corner distances, is `SingleExpansion` with
/// [`ProximityMeasure::Origin`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingStrategy {
    /// One expansion around each unprocessed seed; neighbours of neighbours
    /// are not pulled in.
    SingleExpansion,
    /// Full connected components of the proximity graph.
    #[default]
    ConnectedComponents,
}

/// Distance used to decide whether two candidates are neighbours.
///
/// Defaults to `Gap`. With wide boxes the corner distance between adjacent
/// columns easily exceeds the threshold even when the boxes nearly touch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximityMeasure {
    /// Distance between the top-left corners of the two boxes.
    Origin,
    /// Distance between the nearest edges of the two boxes; zero when they
    /// touch or overlap.
    #[default]
    Gap,
}

/// Parameters for table detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Maximum distance for two candidates to be neighbours.
    pub proximity_threshold: f64,

    pub proximity: ProximityMeasure,

    /// Smallest group (seed included) considered a table region.
    pub min_group_size: usize,

    /// Two candidates whose `y` differ by less than this share a reading line
    /// when ordering candidates.
    pub row_sort_tolerance: f64,

    /// Coordinates closer than this to a band anchor join that band.
    pub band_tolerance: f64,

    /// Minimum share of the implied row x column slots that must be occupied.
    pub min_fill_ratio: f64,

    /// Header cells whose text is longer than this many characters mark
    /// row 0 as a header.
    pub header_min_label_len: usize,

    pub grouping: GroupingStrategy,

    /// Prefix of the generated table names ("Tabela 1", "Tabela 2", ...).
    pub table_name_prefix: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            proximity_threshold: DEFAULT_PROXIMITY_THRESHOLD,
            proximity: ProximityMeasure::default(),
            min_group_size: DEFAULT_MIN_GROUP_SIZE,
            row_sort_tolerance: DEFAULT_ROW_SORT_TOLERANCE,
            band_tolerance: DEFAULT_BAND_TOLERANCE,
            min_fill_ratio: DEFAULT_MIN_FILL_RATIO,
            header_min_label_len: DEFAULT_HEADER_MIN_LABEL_LEN,
            grouping: GroupingStrategy::default(),
            table_name_prefix: DEFAULT_TABLE_NAME_PREFIX.to_string(),
        }
    }
}

impl TableSettings {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("proximity_threshold", self.proximity_threshold),
            ("row_sort_tolerance", self.row_sort_tolerance),
            ("band_tolerance", self.band_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CellMapError::InvalidSettings(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if !(self.min_fill_ratio > 0.0 && self.min_fill_ratio <= 1.0) {
            return Err(CellMapError::InvalidSettings(format!(
                "min_fill_ratio must be in (0, 1], got {}",
                self.min_fill_ratio
            )));
        }
        if self.min_group_size == 0 {
            return Err(CellMapError::InvalidSettings(
                "min_group_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// One occupied grid slot.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub bbox: BBox,
    pub page: u32,
    /// Label of the source candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub candidate_id: String,
}

impl Cell {
    /// Content with surrounding whitespace removed, if any remains.
    pub fn trimmed_content(&self) -> Option<&str> {
        self.content
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A recognised table region.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedTable {
    pub id: String,
    pub name: String,
    /// 1-based position of the table among all tables of one extraction.
    pub ordinal: usize,
    pub page: u32,
    /// Top-left corner of the box enclosing every cell.
    pub origin: Point,
    /// Width and height of the box enclosing every cell.
    pub extent: (f64, f64),
    pub row_count: usize,
    pub col_count: usize,
    pub cells: Vec<Cell>,
    pub has_header_row: bool,
}

/// Why a candidate group was not admitted as a table.
#[derive(Clone, Debug, PartialEq)]
pub enum GridRejection {
    /// Fewer than two row bands or two column bands.
    TooFewBands { rows: usize, cols: usize },
    /// Occupied slots fall below the fill ratio.
    Sparse { occupied: usize, slots: usize },
    /// Two candidates landed on the same (row, col) slot.
    SlotCollision { row: usize, col: usize },
}

/// Outcome of grid analysis on one candidate group.
#[derive(Clone, Debug, PartialEq)]
pub struct GridAnalysis {
    pub row_count: usize,
    pub col_count: usize,
    pub cells: Vec<Cell>,
    pub rejection: Option<GridRejection>,
}

impl GridAnalysis {
    pub fn is_table(&self) -> bool {
        self.rejection.is_none()
    }

    pub(crate) fn rejected(row_count: usize, col_count: usize, reason: GridRejection) -> Self {
        Self {
            row_count,
            col_count,
            cells: Vec::new(),
            rejection: Some(reason),
        }
    }
}
