//! Metrics Module
//!
//! Process-wide request counters shared by every handler, with snapshots for
//! logging and a text exposition for scraping.

mod collector;
mod exposition;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use collector::{Counter, Metrics, MetricsSnapshot};
pub use exposition::render_exposition;

// == Public Constants ==
/// Content type of the text exposition
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";
