//! Error types

mod config;
mod field;
mod load;
mod render;

pub use config::*;
pub use field::*;
pub use load::*;
pub use render::*;
