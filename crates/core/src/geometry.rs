//! Page-local geometry.
//!
//! Coordinates use a top-left origin: `x` grows to the right and `y` grows
//! down the page, the same convention the candidate detector reports.

use serde::{Deserialize, Serialize};

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        (self.x, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Euclidean distance between the top-left corners of two boxes.
    pub fn origin_distance(&self, other: &BBox) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Euclidean distance between the nearest edges of two boxes.
    ///
    /// Zero when the boxes touch or overlap.
    pub fn gap_distance(&self, other: &BBox) -> f64 {
        let dx = (self.x.max(other.x) - self.right().min(other.right())).max(0.0);
        let dy = (self.y.max(other.y) - self.bottom().min(other.bottom())).max(0.0);
        dx.hypot(dy)
    }

    /// True when every component is finite and the size is strictly positive.
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Compute the bounding box enclosing every box in the iterator.
///
/// Returns `None` for an empty iterator.
pub fn union_bbox<'a, I>(boxes: I) -> Option<BBox>
where
    I: IntoIterator<Item = &'a BBox>,
{
    let mut x0 = f64::INFINITY;
    let mut top = f64::INFINITY;
    let mut x1 = f64::NEG_INFINITY;
    let mut bottom = f64::NEG_INFINITY;
    let mut seen = false;
    for b in boxes {
        seen = true;
        x0 = x0.min(b.x);
        top = top.min(b.y);
        x1 = x1.max(b.right());
        bottom = bottom.max(b.bottom());
    }
    seen.then(|| BBox::new(x0, top, x1 - x0, bottom - top))
}
