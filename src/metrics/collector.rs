//! Metrics Collector Module
//!
//! Lock-free counters for index visits, warnings, errors and CRUD operations.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

// == Counter ==
/// Names of the tracked counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Index,
    Warnings,
    Errors,
    Create,
    Read,
    Update,
    Delete,
}

impl Counter {
    /// All counters, in exposition order.
    pub const ALL: [Counter; 7] = [
        Counter::Create,
        Counter::Read,
        Counter::Update,
        Counter::Delete,
        Counter::Errors,
        Counter::Warnings,
        Counter::Index,
    ];

    /// Lowercase name, also used as the `method` label for CRUD counters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Counter::Index => "index",
            Counter::Warnings => "warnings",
            Counter::Errors => "errors",
            Counter::Create => "create",
            Counter::Read => "read",
            Counter::Update => "update",
            Counter::Delete => "delete",
        }
    }
}

// == Metrics ==
/// Shared counter set. Each counter is an independent atomic; increments are
/// never lost, but a snapshot is not a single transaction across counters.
#[derive(Debug)]
pub struct Metrics {
    index: AtomicU64,
    warnings: AtomicU64,
    errors: AtomicU64,
    create: AtomicU64,
    read: AtomicU64,
    update: AtomicU64,
    delete: AtomicU64,
    started: DateTime<Utc>,
}

impl Metrics {
    // == Constructor ==
    /// Creates a new Metrics with all counters at zero, started now.
    pub fn new() -> Self {
        Self {
            index: AtomicU64::new(0),
            warnings: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            create: AtomicU64::new(0),
            read: AtomicU64::new(0),
            update: AtomicU64::new(0),
            delete: AtomicU64::new(0),
            started: Utc::now(),
        }
    }

    fn slot(&self, counter: Counter) -> &AtomicU64 {
        match counter {
            Counter::Index => &self.index,
            Counter::Warnings => &self.warnings,
            Counter::Errors => &self.errors,
            Counter::Create => &self.create,
            Counter::Read => &self.read,
            Counter::Update => &self.update,
            Counter::Delete => &self.delete,
        }
    }

    // == Increment ==
    /// Atomically adds one to `counter`.
    pub fn increment(&self, counter: Counter) {
        self.slot(counter).fetch_add(1, Ordering::Relaxed);
    }

    /// Current value of `counter`.
    pub fn get(&self, counter: Counter) -> u64 {
        self.slot(counter).load(Ordering::Relaxed)
    }

    /// Process start time.
    pub fn started(&self) -> DateTime<Utc> {
        self.started
    }

    // == Snapshot ==
    /// Reads every counter once.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            index: self.get(Counter::Index),
            warnings: self.get(Counter::Warnings),
            errors: self.get(Counter::Errors),
            create: self.get(Counter::Create),
            read: self.get(Counter::Read),
            update: self.get(Counter::Update),
            delete: self.get(Counter::Delete),
            started: self.started,
        }
    }

    /// Renders the current counters in the text exposition format.
    pub fn render_exposition(&self) -> String {
        super::render_exposition(&self.snapshot())
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

// == Metrics Snapshot ==
/// Point-in-time copy of all counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub index: u64,
    pub warnings: u64,
    pub errors: u64,
    pub create: u64,
    pub read: u64,
    pub update: u64,
    pub delete: u64,
    pub started: DateTime<Utc>,
}

impl MetricsSnapshot {
    /// Value of `counter` in this snapshot.
    pub fn value(&self, counter: Counter) -> u64 {
        match counter {
            Counter::Index => self.index,
            Counter::Warnings => self.warnings,
            Counter::Errors => self.errors,
            Counter::Create => self.create,
            Counter::Read => self.read,
            Counter::Update => self.update,
            Counter::Delete => self.delete,
        }
    }

    /// Emits the snapshot as a single structured log event.
    pub fn log(&self, message: &str) {
        info!(
            index = self.index,
            warnings = self.warnings,
            errors = self.errors,
            create = self.create,
            read = self.read,
            update = self.update,
            delete = self.delete,
            started = %self.started.format("%Y-%m-%d %H:%M:%S %Z"),
            "{}",
            message
        );
    }
}
