//! Time sources for the UID generator.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Instant;

use chrono::Utc;

use super::{BUCKET_MILLIS, EPOCH_MILLIS};

/// Supplies the current time bucket to the UID generator.
pub trait TimeSource: Send + Sync {
    /// Number of whole buckets elapsed since the UID epoch.
    fn current_bucket(&self) -> u64;
}

// == Monotonic Clock ==
/// Wall-clock anchored monotonic time source.
///
/// Wall time is read once at construction; later readings add the elapsed
/// [`Instant`] so the bucket never goes backwards when the system clock is
/// adjusted.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    anchor: Instant,
    anchor_offset_ms: u64,
}

impl MonotonicClock {
    /// Creates a clock anchored at the current wall time.
    pub fn new() -> Self {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        Self {
            anchor: Instant::now(),
            anchor_offset_ms: now_ms.saturating_sub(EPOCH_MILLIS),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn current_bucket(&self) -> u64 {
        let elapsed_ms = self.anchor.elapsed().as_millis() as u64;
        (self.anchor_offset_ms + elapsed_ms) / BUCKET_MILLIS
    }
}

// == Manual Clock ==
/// A clock that only moves when told to. Cloned handles share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bucket: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a manual clock reading `bucket`.
    pub fn new(bucket: u64) -> Self {
        Self {
            bucket: Arc::new(AtomicU64::new(bucket)),
        }
    }

    /// Sets the current bucket, also allowing it to move backwards.
    pub fn set(&self, bucket: u64) {
        self.bucket.store(bucket, Ordering::SeqCst);
    }

    /// Moves the clock forward by `buckets`.
    pub fn advance(&self, buckets: u64) {
        self.bucket.fetch_add(buckets, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn current_bucket(&self) -> u64 {
        self.bucket.load(Ordering::SeqCst)
    }
}
