//! Generic tabular data viewer.
//!
//! `casetable` takes an ordered set of [`Column`] descriptors and a dataset of
//! [`Row`] records and derives everything a host needs to present them:
//! debounced free-text search, pagination, per-cell display values and a
//! structured [`Layout`]. It knows nothing about where rows come from or how
//! the layout is drawn.

pub mod cell;
pub mod column;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod pagination;
pub mod render;
pub mod search;
pub mod state;
pub mod view;

pub use cell::{Action, Cell, CellContext, Tone, resolve_cell};
pub use column::{Column, Renderer};
pub use config::TableConfig;
pub use layout::{Layout, RowKey};
pub use model::{Row, Value, rows_from_json};
pub use state::{ViewEvent, ViewState};
pub use view::DataTable;
