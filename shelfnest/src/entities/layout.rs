use crate::entities::Placement;
use crate::geometry::primitives::Rect;

/// Outcome of packing an ordered sequence of items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    /// Placements, in the order the items were packed
    pub placements: Vec<Placement>,
    /// Running bounding-box union of all footprints, inflated by `margin`.
    /// `None` when nothing was placed.
    pub bbox: Option<Rect>,
    /// Margin the bounding rectangle was inflated with
    pub margin: f64,
}

impl Layout {
    pub fn empty(margin: f64) -> Self {
        Layout {
            placements: vec![],
            bbox: None,
            margin,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Area of the bounding rectangle, 0 for an empty layout. Lower is better.
    pub fn area(&self) -> f64 {
        self.bbox.map_or(0.0, |r| r.area())
    }

    /// Bounding rectangle without the margin.
    pub fn raw_bbox(&self) -> Option<Rect> {
        self.bbox.map(|r| r.inflate(-self.margin))
    }
}
