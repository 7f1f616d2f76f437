mod config;
mod shelf;

#[doc(inline)]
pub use config::PackerConfig;
#[doc(inline)]
pub use config::RotationMode;
#[doc(inline)]
pub use shelf::ShelfPacker;
