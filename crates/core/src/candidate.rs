//! Field candidates produced by the upstream detector.
//!
//! A candidate is a labelled box that may or may not belong to a table.
//! The detector emits either a `bbox` or a `position` object; both are
//! accepted and `bbox` wins when both are present.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{CellMapError, Result};
use crate::geometry::BBox;

/// Page number assumed when the input does not carry one.
pub const DEFAULT_PAGE: u32 = 1;

/// A detected field prior to table/cell classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCandidate")]
pub struct FieldCandidate {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub bbox: BBox,
    pub page: u32,
}

impl FieldCandidate {
    pub fn new(id: impl Into<String>, label: Option<&str>, bbox: BBox) -> Self {
        Self {
            id: id.into(),
            label: label.map(str::to_string),
            bbox,
            page: DEFAULT_PAGE,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Label text with surrounding whitespace removed, if any remains.
    pub fn trimmed_label(&self) -> Option<&str> {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Deserialize)]
struct RawPosition {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    page: Option<u32>,
}

#[derive(Deserialize)]
struct RawCandidate {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    bbox: Option<BBox>,
    #[serde(default)]
    position: Option<RawPosition>,
    #[serde(default)]
    page: Option<u32>,
}

impl TryFrom<RawCandidate> for FieldCandidate {
    type Error = CellMapError;

    fn try_from(raw: RawCandidate) -> Result<Self> {
        let position_page = raw.position.as_ref().and_then(|p| p.page);
        let bbox = match (raw.bbox, raw.position) {
            (Some(bbox), _) => bbox,
            (None, Some(p)) => BBox::new(p.x, p.y, p.width, p.height),
            (None, None) => return Err(CellMapError::MissingGeometry(raw.id)),
        };
        Ok(Self {
            id: raw.id,
            label: raw.label,
            bbox,
            page: raw.page.or(position_page).unwrap_or(DEFAULT_PAGE),
        })
    }
}

/// Decode a JSON array of candidates.
pub fn candidates_from_json(json: &str) -> Result<Vec<FieldCandidate>> {
    Ok(serde_json::from_str(json)?)
}

/// Check the batch-level invariants: unique ids, finite coordinates, and
/// strictly positive sizes.
pub fn validate_candidates(candidates: &[FieldCandidate]) -> Result<()> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for c in candidates {
        if !seen.insert(c.id.as_str()) {
            return Err(CellMapError::DuplicateId(c.id.clone()));
        }
        if !c.bbox.x.is_finite() || !c.bbox.y.is_finite() {
            return Err(CellMapError::NonFiniteCoordinate { id: c.id.clone() });
        }
        if !c.bbox.is_well_formed() {
            return Err(CellMapError::InvalidGeometry {
                id: c.id.clone(),
                width: c.bbox.width,
                height: c.bbox.height,
            });
        }
    }
    Ok(())
}
