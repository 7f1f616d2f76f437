mod d_transformation;
mod transformation;

/// Set of traits shared by the geometric primitives
pub mod geo_traits;

/// Point, edge, rectangle and polygon
pub mod primitives;

#[doc(inline)]
pub use d_transformation::DTransformation;
#[doc(inline)]
pub use transformation::Transformation;
