use float_cmp::approx_eq;
use itertools::Itertools;
use log::error;

use crate::entities::{Item, Layout};
use crate::geometry::primitives::Rect;

//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

/// The layout's bounding rectangle equals the bounding-box union of the actual footprints (plus margin),
/// and no two footprint bounding boxes overlap.
pub fn layout_matches_footprints(layout: &Layout, items: &[Item]) -> bool {
    let footprint_bboxes = layout
        .placements
        .iter()
        .map(|p| p.footprint(&items[p.item_id]).bbox())
        .collect_vec();

    let expected = footprint_bboxes
        .iter()
        .copied()
        .reduce(Rect::bounding_rect)
        .map(|r| r.inflate(layout.margin));

    let bbox_ok = match (expected, layout.bbox) {
        (None, None) => true,
        (Some(e), Some(a)) => rects_almost_equal(&e, &a),
        _ => false,
    };
    if !bbox_ok {
        error!(
            "layout bbox {:?} does not match footprints {:?}",
            layout.bbox, expected
        );
        return false;
    }

    bboxes_interiors_disjoint(&footprint_bboxes)
}

pub fn bboxes_interiors_disjoint(bboxes: &[Rect]) -> bool {
    for ((i, a), (j, b)) in bboxes.iter().enumerate().tuple_combinations() {
        let overlap_x = f64::min(a.x_max, b.x_max) - f64::max(a.x_min, b.x_min);
        let overlap_y = f64::min(a.y_max, b.y_max) - f64::max(a.y_min, b.y_min);
        let tolerance = 1e-6 * (1.0 + a.width().max(b.width()).max(a.height()).max(b.height()));
        if overlap_x > tolerance && overlap_y > tolerance {
            error!("footprints {i} and {j} overlap: {a:?} vs {b:?}");
            return false;
        }
    }
    true
}

pub fn rects_almost_equal(a: &Rect, b: &Rect) -> bool {
    let scale = 1.0 + [a.x_min, a.y_min, a.x_max, a.y_max]
        .iter()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let eps = 1e-9 * scale;
    approx_eq!(f64, a.x_min, b.x_min, epsilon = eps)
        && approx_eq!(f64, a.y_min, b.y_min, epsilon = eps)
        && approx_eq!(f64, a.x_max, b.x_max, epsilon = eps)
        && approx_eq!(f64, a.y_max, b.y_max, epsilon = eps)
}
