//! Grid recovery for one candidate group.
//!
//! Rows and columns are recovered by banding the `y` and `x` origins of the
//! group. The group is admitted as a table only when it spans at least two
//! rows and two columns, fills enough of the implied slots, and no two
//! candidates share a slot.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::candidate::FieldCandidate;

use super::clustering::{band_anchors, band_index, reading_order};
use super::types::{Cell, GridAnalysis, GridRejection, TableSettings};

const FILL_EPSILON: f64 = 1e-9;

/// Recover the row/column structure of a candidate group.
pub fn analyze_grid(group: &[&FieldCandidate], settings: &TableSettings) -> GridAnalysis {
    let ordered = reading_order(group, settings.row_sort_tolerance);
    let tol = settings.band_tolerance;

    let rows = band_anchors(ordered.iter().map(|c| c.bbox.y), tol);
    let cols = band_anchors(ordered.iter().map(|c| c.bbox.x), tol);
    let (row_count, col_count) = (rows.len(), cols.len());

    if row_count < 2 || col_count < 2 {
        debug!(row_count, col_count, "rejected group: too few bands");
        return GridAnalysis::rejected(
            row_count,
            col_count,
            GridRejection::TooFewBands {
                rows: row_count,
                cols: col_count,
            },
        );
    }

    let slots = row_count * col_count;
    if (group.len() as f64) + FILL_EPSILON < settings.min_fill_ratio * slots as f64 {
        debug!(occupied = group.len(), slots, "rejected group: sparse grid");
        return GridAnalysis::rejected(
            row_count,
            col_count,
            GridRejection::Sparse {
                occupied: group.len(),
                slots,
            },
        );
    }

    let mut occupied: FxHashMap<(usize, usize), &str> = FxHashMap::default();
    let mut cells = Vec::with_capacity(ordered.len());
    for c in ordered {
        let (Some(row), Some(col)) = (
            band_index(&rows, c.bbox.y, tol),
            band_index(&cols, c.bbox.x, tol),
        ) else {
            trace!(id = %c.id, "dropped candidate outside every band");
            continue;
        };
        if let Some(prev) = occupied.insert((row, col), c.id.as_str()) {
            debug!(row, col, first = prev, second = %c.id, "rejected group: slot collision");
            return GridAnalysis::rejected(
                row_count,
                col_count,
                GridRejection::SlotCollision { row, col },
            );
        }
        cells.push(Cell {
            row,
            col,
            bbox: c.bbox,
            page: c.page,
            content: c.label.clone(),
            candidate_id: c.id.clone(),
        });
    }

    GridAnalysis {
        row_count,
        col_count,
        cells,
        rejection: None,
    }
}
