//! Genetic search over item orderings for the [`shelfnest`] shelf packer.
//!
//! Each candidate ordering is packed by [`shelfnest::packing::ShelfPacker`] and scored by the
//! area of the resulting bounding rectangle. The best layout ever encountered is returned.

use std::sync::LazyLock;
use std::time::Instant;

pub mod config;
pub mod io;
pub mod opt;
pub mod util;

/// Start of the process, used as reference point in the logs
pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);
