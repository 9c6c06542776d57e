//! Words Module
//!
//! The read-only word list and the loader for its JSON dataset file.

mod dataset;
mod store;

// Re-export public types
pub use dataset::{Dataset, DatasetError};
pub use store::WordStore;
