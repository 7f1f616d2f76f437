mod document;
mod transform;

/// Resolving one representative polygon per source document
pub mod import;

/// Rendering layouts back into SVG
pub mod svg;

#[doc(inline)]
pub use document::{SvgDocument, SvgElement, SvgNode};
