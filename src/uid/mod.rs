//! Unique ID Module
//!
//! Generates process-unique, time-sortable 64-bit identifiers.
//!
//! # Layout
//! Most significant bits first:
//! - 39 bits: time bucket, in units of 10 ms since [`EPOCH_MILLIS`]
//! - 8 bits: sequence within the bucket
//! - 16 bits: machine id

mod clock;
mod generator;


// Re-export public types
pub use clock::{ManualClock, MonotonicClock, TimeSource};
pub use generator::{decompose, UidError, UidGenerator, UidParts};

// == Public Constants ==
/// Number of bits used by the time bucket
pub const BITS_TIME: u32 = 39;

/// Number of bits used by the sequence counter
pub const BITS_SEQUENCE: u32 = 8;

/// Number of bits used by the machine id
pub const BITS_MACHINE_ID: u32 = 16;

/// Length of one time bucket in milliseconds
pub const BUCKET_MILLIS: u64 = 10;

/// Epoch of the time bucket: 2014-09-01T00:00:00Z in Unix milliseconds
pub const EPOCH_MILLIS: u64 = 1_409_529_600_000;

/// Largest sequence value within a bucket
pub const MAX_SEQUENCE: u16 = (1 << BITS_SEQUENCE) - 1;

/// Largest representable time bucket
pub const MAX_BUCKET: u64 = (1 << BITS_TIME) - 1;
