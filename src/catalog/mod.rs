//! Remote product catalog: record types and the HTTP data source.

pub mod client;
pub mod types;

pub use client::ProductClient;
pub use types::Product;
