//! Word Shuffle - A small HTTP service handing out random words
//!
//! Every word is tagged with a process-unique, time-ordered ID. Request
//! counters are exposed for scraping and the server drains gracefully on
//! SIGINT/SIGTERM.

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod server;
pub mod shutdown;
pub mod tasks;
pub mod uid;
pub mod words;

pub use api::AppState;
pub use config::{Config, ServiceConfiguration};
pub use shutdown::{ShutdownCoordinator, ShutdownOutcome, ShutdownState};
pub use tasks::spawn_metrics_reporter;
