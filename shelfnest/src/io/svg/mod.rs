mod layout_to_svg;
mod svg_util;

#[doc(inline)]
pub use layout_to_svg::*;

#[doc(inline)]
pub use svg_util::SvgExportOptions;
