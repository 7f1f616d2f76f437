use serde::{Deserialize, Serialize};
use svg::node::Blob;

use crate::io::SvgNode;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Clone, Debug, Copy, Serialize, Deserialize, PartialEq)]
pub struct SvgExportOptions {
    /// Sets `width`, `height` and `viewBox` of the root element to the extent of the layout
    #[serde(default = "default_fit_canvas")]
    pub fit_canvas: bool,
}

fn default_fit_canvas() -> bool {
    true
}

impl Default for SvgExportOptions {
    fn default() -> Self {
        Self {
            fit_canvas: default_fit_canvas(),
        }
    }
}

/// Converts a parsed node back into an `svg` node, attributes and text unchanged.
///
/// The node is serialized by [`SvgNode`]'s own `Display`, so the decoded content is escaped exactly
/// once. `svg`'s element serializer does not escape quotes inside attribute values.
pub fn to_svg_node(node: &SvgNode) -> Blob {
    Blob::new(node.to_string())
}
