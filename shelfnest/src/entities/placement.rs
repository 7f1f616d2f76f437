use serde::{Deserialize, Serialize};

use crate::entities::Item;
use crate::geometry::DTransformation;
use crate::geometry::geo_traits::Transformable;
use crate::geometry::primitives::Polygon;

/// Where and how an [`Item`] ended up in a [`Layout`](crate::entities::Layout).
#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// The id of the placed item
    pub item_id: usize,
    /// Cursor position, where the minimum corner of the footprint's bounding box lands
    pub x: f64,
    pub y: f64,
    /// Rotation (degrees) requested for the item
    pub angle: f64,
    /// Transformation mapping the item's shape onto its footprint
    pub d_transf: DTransformation,
}

impl Placement {
    /// The item's shape as it lies in the layout.
    pub fn footprint(&self, item: &Item) -> Polygon {
        debug_assert_eq!(item.id, self.item_id);
        item.shape.transform_clone(&self.d_transf.compose())
    }
}
