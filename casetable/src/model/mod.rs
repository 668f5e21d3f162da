//! Row records and their field values

mod money;
mod row;
mod row_serde;
mod value;

pub use money::*;
pub use row::*;
pub use row_serde::{rows_from_json, rows_from_path};
pub use value::*;
