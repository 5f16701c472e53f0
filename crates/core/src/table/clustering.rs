//! One-dimensional tolerance banding for table rows and columns.
//!
//! A band is anchored at the first (smallest) distinct coordinate that is not
//! already within tolerance of an existing anchor. Anchors never move once
//! placed, and a coordinate is assigned to the first anchor within tolerance,
//! not the nearest one.

use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::trace;

use crate::candidate::FieldCandidate;

use super::types::{KeyF64, key_f64};

fn within(anchor: f64, value: f64, tolerance: f64) -> bool {
    anchor == value || (anchor - value).abs() < tolerance
}

/// Build ascending band anchors from a list of coordinates.
pub fn band_anchors<I>(values: I, tolerance: f64) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let distinct: BTreeSet<KeyF64> = values.into_iter().map(key_f64).collect();
    let mut anchors: Vec<f64> = Vec::new();
    for v in distinct.into_iter().map(|k| k.into_inner()) {
        if !anchors.iter().any(|&a| within(a, v, tolerance)) {
            anchors.push(v);
        }
    }
    trace!(?anchors, tolerance, "built bands");
    anchors
}

/// Index of the first band whose anchor is within tolerance of `value`.
pub fn band_index(anchors: &[f64], value: f64, tolerance: f64) -> Option<usize> {
    anchors.iter().position(|&a| within(a, value, tolerance))
}

/// Order candidates top-to-bottom, then left-to-right.
///
/// Candidates whose `y` is within `row_tolerance` of the first candidate of
/// the current line share that line and are ordered by `x`.
pub fn reading_order<'a>(
    candidates: &[&'a FieldCandidate],
    row_tolerance: f64,
) -> Vec<&'a FieldCandidate> {
    let by_y = candidates
        .iter()
        .copied()
        .sorted_by(|a, b| {
            a.bbox
                .y
                .total_cmp(&b.bbox.y)
                .then(a.bbox.x.total_cmp(&b.bbox.x))
        })
        .collect_vec();

    let mut ordered = Vec::with_capacity(by_y.len());
    let mut line: Vec<&FieldCandidate> = Vec::new();
    let mut line_y = f64::NAN;
    for c in by_y {
        if line.is_empty() || (c.bbox.y - line_y).abs() < row_tolerance {
            if line.is_empty() {
                line_y = c.bbox.y;
            }
            line.push(c);
            continue;
        }
        line.sort_by(|a, b| a.bbox.x.total_cmp(&b.bbox.x));
        ordered.append(&mut line);
        line_y = c.bbox.y;
        line.push(c);
    }
    line.sort_by(|a, b| a.bbox.x.total_cmp(&b.bbox.x));
    ordered.append(&mut line);
    ordered
}
