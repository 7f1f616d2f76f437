//! Packing engine for nesting flat shapes, extracted from SVG documents, onto a single canvas.
//!
//! The canvas has a fixed width and grows downward: items are laid out in rows (shelves) by the
//! [`packing::ShelfPacker`]. Which order the items are offered in is left to the caller,
//! see the `gnest` crate for a genetic search over orderings.

/// Geometric primitives and the pure functions operating on them
pub mod geometry;

/// Items, placements and layouts
pub mod entities;

/// Shelf (row) based placement heuristic
pub mod packing;

/// Reading source documents and rendering layouts
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;

mod error;

#[doc(inline)]
pub use error::NestError;
#[doc(inline)]
pub use error::Result;
