//! Dashboard core: view state, filtering, sorting, paging, rendering model
//! and the controller tying them to load results and user actions.

pub mod controller;
pub mod engine;
pub mod pagination;
pub mod render;
pub mod view_state;

pub use controller::{Controller, DataSource, LoadStatus};
pub use render::{SortIndicator, TableModel};
pub use view_state::{Column, SortField};
