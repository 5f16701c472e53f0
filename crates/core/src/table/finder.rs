//! Table finder: runs grouping, grid analysis and header detection over a
//! page of candidates and assembles `DetectedTable`s.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::candidate::FieldCandidate;
use crate::geometry::union_bbox;

use super::grid::analyze_grid;
use super::grouping::group_candidates;
use super::header::is_header_row;
use super::types::{DetectedTable, TableSettings};

/// Detect tables among the candidates of a single page.
///
/// Tables are numbered from 1 in the order their groups were formed.
pub fn detect_tables(
    candidates: &[FieldCandidate],
    settings: &TableSettings,
) -> Vec<DetectedTable> {
    let mut ordinal = 1;
    detect_tables_numbered(candidates, settings, &mut ordinal)
}

/// Like [`detect_tables`], continuing the numbering from `next_ordinal`.
pub(crate) fn detect_tables_numbered(
    candidates: &[FieldCandidate],
    settings: &TableSettings,
    next_ordinal: &mut usize,
) -> Vec<DetectedTable> {
    let mut tables = Vec::new();
    for group in group_candidates(candidates, settings) {
        let analysis = analyze_grid(&group, settings);
        if !analysis.is_table() || analysis.cells.is_empty() {
            continue;
        }
        let Some(bounds) = union_bbox(analysis.cells.iter().map(|c| &c.bbox)) else {
            continue;
        };
        let has_header_row = is_header_row(
            &analysis.cells,
            analysis.row_count,
            settings.header_min_label_len,
        );
        let ordinal = *next_ordinal;
        *next_ordinal += 1;

        let table = DetectedTable {
            id: format!("table_{ordinal}"),
            name: format!("{} {}", settings.table_name_prefix, ordinal),
            ordinal,
            page: analysis.cells[0].page,
            origin: bounds.origin(),
            extent: (bounds.width, bounds.height),
            row_count: analysis.row_count,
            col_count: analysis.col_count,
            cells: analysis.cells,
            has_header_row,
        };
        debug!(
            id = %table.id,
            rows = table.row_count,
            cols = table.col_count,
            cells = table.cells.len(),
            header = table.has_header_row,
            "detected table"
        );
        tables.push(table);
    }
    tables
}

/// Candidates not claimed by any table cell, in input order.
pub fn standalone_candidates<'a>(
    candidates: &'a [FieldCandidate],
    tables: &[DetectedTable],
) -> Vec<&'a FieldCandidate> {
    let claimed: FxHashSet<&str> = tables
        .iter()
        .flat_map(|t| t.cells.iter().map(|c| c.candidate_id.as_str()))
        .collect();
    candidates
        .iter()
        .filter(|c| !claimed.contains(c.id.as_str()))
        .collect()
}
