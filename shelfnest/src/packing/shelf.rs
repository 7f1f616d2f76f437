use log::trace;

use crate::entities::{Item, Layout, Placement};
use crate::geometry::Transformation;
use crate::geometry::primitives::Rect;
use crate::packing::PackerConfig;
use crate::util::assertions;

/// Lays items out left to right in rows (shelves) bounded by the bin width.
///
/// When the next item would cross the bin width, a new row is opened below the tallest item of
/// the current row. Only bounding boxes are considered: the outlines of the items are never
/// tested against each other, non-overlap follows from the row and cursor discipline alone.
#[derive(Clone, Debug, Copy)]
pub struct ShelfPacker {
    pub config: PackerConfig,
}

impl ShelfPacker {
    pub fn new(config: PackerConfig) -> Self {
        Self { config }
    }

    /// Packs `items` in the given order, each with its own rotation in degrees.
    ///
    /// An item wider than the bin width always gets a row of its own and sticks out of the bin.
    pub fn pack<'a>(&self, items: impl IntoIterator<Item = (&'a Item, f64)>) -> Layout {
        let PackerConfig {
            spacing,
            bin_width,
            margin,
            ..
        } = self.config;

        let (mut x, mut y) = (0.0, 0.0);
        let mut row_height: f64 = 0.0;
        let mut row_len = 0;
        let mut raw_bbox: Option<Rect> = None;
        let mut placements = vec![];

        for (item, angle) in items {
            let rotated_bbox = item.shape.rotate(angle, None).bbox();
            let (width, height) = (rotated_bbox.width(), rotated_bbox.height());

            if row_len > 0 && x + width > bin_width {
                trace!(
                    "[SHELF] item {} does not fit in row at y: {y:.3}, wrapping",
                    item.id
                );
                x = 0.0;
                y += row_height + spacing;
                row_height = 0.0;
                row_len = 0;
            }

            // rotate around the bbox midpoint, then move the rotated bbox onto the cursor
            let d_transf = Transformation::from_rotation_around(
                angle.to_radians(),
                item.shape.bbox().centroid(),
            )
            .translate((x - rotated_bbox.x_min, y - rotated_bbox.y_min))
            .decompose();

            let footprint_bbox = Rect {
                x_min: x,
                y_min: y,
                x_max: x + width,
                y_max: y + height,
            };
            raw_bbox = Some(match raw_bbox {
                None => footprint_bbox,
                Some(acc) => Rect::bounding_rect(acc, footprint_bbox),
            });

            placements.push(Placement {
                item_id: item.id,
                x,
                y,
                angle,
                d_transf,
            });

            x += width + spacing;
            row_height = row_height.max(height);
            row_len += 1;
        }

        Layout {
            placements,
            bbox: raw_bbox.map(|r| r.inflate(margin)),
            margin,
        }
    }

    /// Packs `items` in the order given by `order` (indices into `items`), without rotation.
    pub fn pack_order(&self, items: &[Item], order: &[usize]) -> Layout {
        let layout = self.pack(order.iter().map(|&i| (&items[i], 0.0)));
        debug_assert!(assertions::layout_matches_footprints(&layout, items));
        layout
    }

    /// Packs `items` in the order given by `order`, with `angles[k]` the rotation for `order[k]`.
    pub fn pack_rotated(&self, items: &[Item], order: &[usize], angles: &[f64]) -> Layout {
        debug_assert_eq!(order.len(), angles.len());
        let layout = self.pack(
            order
                .iter()
                .zip(angles.iter())
                .map(|(&i, &angle)| (&items[i], angle)),
        );
        debug_assert!(assertions::layout_matches_footprints(&layout, items));
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::Polygon;
    use float_cmp::approx_eq;
    use test_case::test_case;

    fn squares(sizes: &[f64]) -> Vec<Item> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                Item::new(
                    i,
                    format!("square_{i}"),
                    Polygon::from_box(0.0, 0.0, s, s).unwrap(),
                )
            })
            .collect()
    }

    fn packer(spacing: f64, bin_width: f64, margin: f64) -> ShelfPacker {
        ShelfPacker::new(PackerConfig {
            spacing,
            bin_width,
            margin,
            ..Default::default()
        })
    }

    #[test]
    fn single_row() {
        let items = squares(&[10.0, 20.0]);
        let layout = packer(5.0, 50.0, 0.0).pack_order(&items, &[0, 1]);
        let positions: Vec<_> = layout.placements.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(positions, vec![(0.0, 0.0), (15.0, 0.0)]);
        let bbox = layout.bbox.unwrap();
        assert_eq!((bbox.width(), bbox.height()), (35.0, 20.0));
    }

    #[test]
    fn wraps_into_second_row() {
        let items = squares(&[10.0, 20.0]);
        let layout = packer(5.0, 15.0, 0.0).pack_order(&items, &[0, 1]);
        let positions: Vec<_> = layout.placements.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(positions, vec![(0.0, 0.0), (0.0, 15.0)]);
        let bbox = layout.bbox.unwrap();
        assert_eq!((bbox.width(), bbox.height()), (20.0, 35.0));
    }

    #[test]
    fn row_height_is_tallest_item() {
        let items = squares(&[10.0, 30.0, 10.0, 10.0]);
        // row 1: 10 + 5 + 30 = 45, the third square would end at 60
        let layout = packer(5.0, 50.0, 0.0).pack_order(&items, &[0, 1, 2, 3]);
        let positions: Vec<_> = layout.placements.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            positions,
            vec![(0.0, 0.0), (15.0, 0.0), (0.0, 35.0), (15.0, 35.0)]
        );
    }

    #[test]
    fn oversized_item_gets_its_own_row() {
        let items = squares(&[80.0, 10.0, 90.0]);
        let layout = packer(0.0, 50.0, 0.0).pack_order(&items, &[0, 1, 2]);
        let positions: Vec<_> = layout.placements.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(positions, vec![(0.0, 0.0), (0.0, 80.0), (0.0, 90.0)]);
        assert_eq!(layout.bbox.unwrap().width(), 90.0);
    }

    #[test_case(0.0; "no margin")]
    #[test_case(2.5; "small margin")]
    #[test_case(40.0; "large margin")]
    fn margin_inflates_every_side(margin: f64) {
        let items = squares(&[10.0, 20.0]);
        let raw = packer(5.0, 50.0, 0.0).pack_order(&items, &[0, 1]);
        let inflated = packer(5.0, 50.0, margin).pack_order(&items, &[0, 1]);
        let (r, i) = (raw.bbox.unwrap(), inflated.bbox.unwrap());
        assert_eq!(i.width(), r.width() + 2.0 * margin);
        assert_eq!(i.height(), r.height() + 2.0 * margin);
        assert_eq!(inflated.raw_bbox().unwrap(), r);
    }

    #[test]
    fn zero_items_give_empty_layout() {
        let layout = packer(5.0, 50.0, 3.0).pack_order(&[], &[]);
        assert!(layout.is_empty());
        assert_eq!(layout.bbox, None);
        assert_eq!(layout.area(), 0.0);
    }

    #[test]
    fn shapes_away_from_origin_are_anchored_at_the_cursor() {
        let items = vec![
            Item::new(0, "a", Polygon::from_box(-45.0, -45.0, 45.0, 45.0).unwrap()),
            Item::new(1, "b", Polygon::from_box(100.0, 100.0, 110.0, 120.0).unwrap()),
        ];
        let layout = packer(10.0, 1000.0, 0.0).pack_order(&items, &[0, 1]);
        let second = layout.placements[1];
        assert_eq!((second.x, second.y), (100.0, 0.0));
        let fp = second.footprint(&items[1]).bbox();
        assert_eq!((fp.x_min, fp.y_min), (100.0, 0.0));
        assert_eq!(layout.bbox.unwrap(), Rect::try_new(0.0, 0.0, 110.0, 90.0).unwrap());
    }

    #[test]
    fn rotated_item_uses_rotated_extent() {
        let items = vec![Item::new(0, "bar", Polygon::from_box(0.0, 0.0, 40.0, 10.0).unwrap())];
        let layout = packer(0.0, 100.0, 0.0).pack_rotated(&items, &[0], &[90.0]);
        let bbox = layout.bbox.unwrap();
        assert!(approx_eq!(f64, bbox.width(), 10.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, bbox.height(), 40.0, epsilon = 1e-9));
        let fp = layout.placements[0].footprint(&items[0]).bbox();
        assert!(approx_eq!(f64, fp.x_min, 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, fp.y_min, 0.0, epsilon = 1e-9));
    }
}
