#[cfg(test)]
mod tests {
    use std::path::Path;

    use itertools::Itertools;
    use test_case::test_case;

    use shelfnest::entities::Item;
    use shelfnest::geometry::primitives::{Polygon, Rect};
    use shelfnest::io::SvgDocument;
    use shelfnest::io::import::{Importer, extract_shape};
    use shelfnest::io::svg::{SvgExportOptions, layout_to_svg};
    use shelfnest::packing::{PackerConfig, RotationMode, ShelfPacker};
    use shelfnest::util::assertions;

    const SHAPES: [&str; 7] = [
        "../assets/shapes/square_10.svg",
        "../assets/shapes/square_20.svg",
        "../assets/shapes/disc.svg",
        "../assets/shapes/triangle.svg",
        "../assets/shapes/bracket.svg",
        "../assets/shapes/lens.svg",
        "../assets/shapes/glyph_a.svg",
    ];

    fn load_all() -> Vec<SvgDocument> {
        SHAPES
            .iter()
            .map(|p| SvgDocument::load(Path::new(p)).unwrap())
            .collect()
    }

    #[test_case("../assets/shapes/square_10.svg", (0.0, 0.0, 10.0, 10.0); "square")]
    #[test_case("../assets/shapes/disc.svg", (0.0, 0.0, 30.0, 30.0); "disc")]
    #[test_case("../assets/shapes/triangle.svg", (0.0, 0.0, 50.0, 40.0); "triangle")]
    #[test_case("../assets/shapes/bracket.svg", (5.0, 5.0, 35.0, 45.0); "bracket")]
    #[test_case("../assets/shapes/lens.svg", (-25.0, -10.0, 25.0, 10.0); "lens")]
    #[test_case("../assets/shapes/glyph_a.svg", (0.0, -20.0, 100.0, 80.0); "glyph")]
    fn extracted_bounds(path: &str, (x_min, y_min, x_max, y_max): (f64, f64, f64, f64)) {
        let _ = env_logger::builder().is_test(true).try_init();
        let doc = SvgDocument::load(Path::new(path)).unwrap();
        let shape = extract_shape(&doc).unwrap();
        assert_eq!(
            shape.bbox(),
            Rect {
                x_min,
                y_min,
                x_max,
                y_max
            }
        );
    }

    #[test]
    fn document_identifier_is_file_stem() {
        let doc = SvgDocument::load(Path::new(SHAPES[3])).unwrap();
        assert_eq!(doc.id, "triangle");
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = SvgDocument::load(Path::new("../assets/shapes/does_not_exist.svg"));
        assert!(matches!(result, Err(shelfnest::NestError::Io(_))));
    }

    #[test_case(RotationMode::None; "no rotation")]
    #[test_case(RotationMode::Discrete(4); "quarter turns")]
    #[test_case(RotationMode::Discrete(6); "sixth turns")]
    fn packed_footprints_do_not_overlap(rotation: RotationMode) {
        let _ = env_logger::builder().is_test(true).try_init();
        let items = Importer.import_items(&load_all()).unwrap();
        let packer = ShelfPacker::new(PackerConfig {
            spacing: 2.0,
            bin_width: 120.0,
            margin: 3.0,
            rotation,
        });
        let angles = rotation.angles();

        for order in [vec![0, 1, 2, 3, 4, 5, 6], vec![6, 5, 4, 3, 2, 1, 0], vec![3, 0, 6, 1, 5, 2, 4]] {
            let rotations = order
                .iter()
                .enumerate()
                .map(|(k, _)| angles[k % angles.len()])
                .collect_vec();
            let layout = packer.pack_rotated(&items, &order, &rotations);

            assert_eq!(layout.placements.len(), items.len());
            assert!(assertions::layout_matches_footprints(&layout, &items));

            let bboxes = layout
                .placements
                .iter()
                .map(|p| p.footprint(&items[p.item_id]).bbox())
                .collect_vec();
            assert!(assertions::bboxes_interiors_disjoint(&bboxes));
            for bbox in &bboxes {
                assert!(bbox.x_min > -1e-9 && bbox.y_min > -1e-9);
            }
        }
    }

    #[test]
    fn translate_shifts_bounds() {
        let shapes = [
            Polygon::from_box(0.0, 0.0, 10.0, 5.0).unwrap(),
            Polygon::new(vec![(0.0, 40.0).into(), (25.0, 0.0).into(), (50.0, 40.0).into()]).unwrap(),
            Polygon::new(vec![(-3.0, -3.0).into(), (4.0, 1.0).into(), (0.5, 9.0).into(), (-2.0, 2.0).into()])
                .unwrap(),
        ];
        for (shape, (dx, dy)) in shapes
            .iter()
            .cartesian_product([(0.0, 0.0), (7.5, -2.0), (-100.0, 33.0)])
        {
            let expected = shape.bbox().translate(dx, dy);
            let actual = shape.translate(dx, dy).bbox();
            assert!(assertions::rects_almost_equal(&actual, &expected));
        }
    }

    #[test]
    fn intersects_is_symmetric() {
        let shapes = [
            Polygon::from_box(0.0, 0.0, 10.0, 10.0).unwrap(),
            Polygon::from_box(10.0, 0.0, 20.0, 10.0).unwrap(),
            Polygon::from_box(2.0, 2.0, 4.0, 4.0).unwrap(),
            Polygon::from_box(30.0, 30.0, 31.0, 31.0).unwrap(),
            Polygon::new(vec![(5.0, -5.0).into(), (15.0, 5.0).into(), (5.0, 15.0).into()]).unwrap(),
        ];
        for (a, b) in shapes.iter().tuple_combinations() {
            assert_eq!(a.intersects(b), b.intersects(a));
        }
    }

    #[test]
    fn import_pack_render() {
        let docs = load_all();
        let items: Vec<Item> = Importer.import_items(&docs).unwrap();
        let order = (0..items.len()).collect_vec();
        let layout = ShelfPacker::new(PackerConfig::default()).pack_order(&items, &order);

        let out = layout_to_svg(&layout, &docs, SvgExportOptions::default()).to_string();
        for p in &layout.placements {
            assert!(out.contains(&format!(r#"id="item_{}""#, p.item_id)));
        }
        // content of the source documents is carried over
        assert!(out.contains("#b58fd4"));
        assert!(out.contains(r#"unicode="a""#));
        assert!(out.contains(r#"id="bbox""#));
    }
}
