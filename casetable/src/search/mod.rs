//! Free-text search: the row filter and the debounce that feeds it.

mod debounce;
mod driver;
mod filter;

pub use debounce::*;
pub use driver::*;
pub use filter::*;
