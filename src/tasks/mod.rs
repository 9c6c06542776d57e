//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Metrics reporter: logs a counter snapshot at a fixed interval in debug mode

mod reporter;

pub use reporter::{spawn_metrics_reporter, DEFAULT_REPORT_INTERVAL};
