use log::warn;
use svg::Document;
use svg::node::element::{Group, Rectangle};

use crate::entities::Layout;
use crate::io::SvgDocument;
use crate::io::svg::SvgExportOptions;
use crate::io::svg::svg_util::{SVG_NAMESPACE, to_svg_node};

/// Renders a layout, the content of each source document is moved onto its placement.
///
/// `documents` is indexed by item id.
pub fn layout_to_svg(
    layout: &Layout,
    documents: &[SvgDocument],
    options: SvgExportOptions,
) -> Document {
    let margin = layout.margin;

    let mut items_group = Group::new().set("id", "items");
    if margin > 0.0 {
        items_group = items_group.set("transform", format!("translate({margin} {margin})"));
    }

    for placement in &layout.placements {
        let (tx, ty) = placement.d_transf.translation();
        let mut transform = format!("translate({tx} {ty})");
        if placement.angle != 0.0 {
            transform.push_str(&format!(" rotate({})", placement.d_transf.rotation_degrees()));
        }

        let mut item_group = Group::new()
            .set("id", format!("item_{}", placement.item_id))
            .set("transform", transform);
        match documents.get(placement.item_id) {
            Some(doc) => {
                for child in &doc.root.children {
                    item_group = item_group.add(to_svg_node(child));
                }
            }
            None => warn!(
                "[SVG] no source document for item {}, emitting an empty group",
                placement.item_id
            ),
        }
        items_group = items_group.add(item_group);
    }

    let mut document = Document::new()
        .set("xmlns", SVG_NAMESPACE)
        .add(items_group);

    if let Some(bbox) = layout.bbox {
        // the items are shifted by the margin, the outline is not
        let (x, y) = (bbox.x_min + margin, bbox.y_min + margin);
        document = document.add(
            Rectangle::new()
                .set("id", "bbox")
                .set("x", x)
                .set("y", y)
                .set("width", bbox.width())
                .set("height", bbox.height())
                .set("fill", "none")
                .set("stroke", "black"),
        );
        if options.fit_canvas {
            document = document
                .set("width", bbox.width())
                .set("height", bbox.height())
                .set("viewBox", (x, y, bbox.width(), bbox.height()));
        }
    }

    document
}
