mod ga;
mod individual;

#[doc(inline)]
pub use ga::{GAOptimizer, GASolution};
#[doc(inline)]
pub use individual::Individual;
