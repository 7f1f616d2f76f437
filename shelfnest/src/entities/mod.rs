mod item;
mod layout;
mod placement;

#[doc(inline)]
pub use item::Item;
#[doc(inline)]
pub use layout::Layout;
#[doc(inline)]
pub use placement::Placement;
