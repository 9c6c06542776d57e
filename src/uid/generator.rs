//! UID Generator Module
//!
//! Lock-based generator combining a time bucket, a per-bucket sequence and a
//! fixed machine id into one `u64`.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

use super::{
    MonotonicClock, TimeSource, BITS_MACHINE_ID, BITS_SEQUENCE, BUCKET_MILLIS, EPOCH_MILLIS,
    MAX_BUCKET, MAX_SEQUENCE,
};

// == UID Error ==
/// Failures of [`UidGenerator::next_id`]. Both are transient for the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UidError {
    /// All sequence values of the current bucket were handed out
    #[error("sequence exhausted for time bucket {bucket}")]
    SequenceExhausted { bucket: u64 },

    /// The time bucket no longer fits its bit width
    #[error("time bucket exceeds the representable range")]
    TimeOverflow,
}

// == Generator State ==
#[derive(Debug, Clone, Copy)]
struct State {
    bucket: u64,
    sequence: u16,
}

// == UID Generator ==
/// Thread-safe generator of unique, time-ordered IDs.
///
/// Internal state is serialized through a mutex, so concurrent callers never
/// see the same `(bucket, sequence)` pair twice.
pub struct UidGenerator {
    machine_id: u16,
    state: Mutex<Option<State>>,
    clock: Arc<dyn TimeSource>,
}

impl UidGenerator {
    // == Constructors ==
    /// Creates a generator reading the wall clock.
    pub fn new(machine_id: u16) -> Self {
        Self::with_clock(machine_id, Arc::new(MonotonicClock::new()))
    }

    /// Creates a generator reading the given time source.
    pub fn with_clock(machine_id: u16, clock: Arc<dyn TimeSource>) -> Self {
        Self {
            machine_id,
            state: Mutex::new(None),
            clock,
        }
    }

    /// The machine id encoded in every generated ID.
    pub fn machine_id(&self) -> u16 {
        self.machine_id
    }

    // == Next ID ==
    /// Generates the next ID.
    ///
    /// A newer bucket resets the sequence. The same bucket, or an older one
    /// if the clock stepped back, keeps the last bucket and increments the
    /// sequence. When the sequence is full the call fails and the state is
    /// left untouched, so the next bucket starts clean.
    pub fn next_id(&self) -> Result<u64, UidError> {
        let now = self.clock.current_bucket();
        if now > MAX_BUCKET {
            return Err(UidError::TimeOverflow);
        }

        let mut state = self.state.lock();
        let next = match *state {
            None => State {
                bucket: now,
                sequence: 0,
            },
            Some(current) => match now.cmp(&current.bucket) {
                Ordering::Greater => State {
                    bucket: now,
                    sequence: 0,
                },
                Ordering::Equal | Ordering::Less => {
                    if current.sequence >= MAX_SEQUENCE {
                        debug!(bucket = current.bucket, "UID sequence exhausted");
                        return Err(UidError::SequenceExhausted {
                            bucket: current.bucket,
                        });
                    }
                    State {
                        bucket: current.bucket,
                        sequence: current.sequence + 1,
                    }
                }
            },
        };
        *state = Some(next);

        Ok(compose(next.bucket, next.sequence, self.machine_id))
    }
}

impl fmt::Debug for UidGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UidGenerator")
            .field("machine_id", &self.machine_id)
            .field("state", &*self.state.lock())
            .finish()
    }
}

// == Layout Helpers ==
fn compose(bucket: u64, sequence: u16, machine_id: u16) -> u64 {
    (bucket << (BITS_SEQUENCE + BITS_MACHINE_ID))
        | (u64::from(sequence) << BITS_MACHINE_ID)
        | u64::from(machine_id)
}

/// The components of a generated ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UidParts {
    pub bucket: u64,
    pub sequence: u16,
    pub machine_id: u16,
}

impl UidParts {
    /// Wall time at the start of the ID's bucket.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let millis = EPOCH_MILLIS.checked_add(self.bucket.checked_mul(BUCKET_MILLIS)?)?;
        Utc.timestamp_millis_opt(i64::try_from(millis).ok()?).single()
    }
}

/// Splits an ID into its components.
pub fn decompose(uid: u64) -> UidParts {
    UidParts {
        bucket: uid >> (BITS_SEQUENCE + BITS_MACHINE_ID),
        sequence: ((uid >> BITS_MACHINE_ID) & u64::from(MAX_SEQUENCE)) as u16,
        machine_id: (uid & 0xFFFF) as u16,
    }
}
