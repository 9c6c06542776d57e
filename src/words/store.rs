//! Word Store Module
//!
//! Fixed list of words with uniform random selection.

use chrono::Utc;
use parking_lot::Mutex;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::{Result, ServiceError};

// == Word Store ==
/// Immutable word list shared by every request.
///
/// Only the random number generator is mutable; it is seeded once from the
/// clock and is not meant to be cryptographically secure.
#[derive(Debug)]
pub struct WordStore {
    /// The loaded words
    words: Vec<String>,
    /// Source of selection indices
    rng: Mutex<StdRng>,
}

impl WordStore {
    // == Constructors ==
    /// Creates a store seeded from the current time.
    pub fn new(words: Vec<String>) -> Self {
        let seed = Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
        Self::with_seed(words, seed)
    }

    /// Creates a store with a fixed seed.
    pub fn with_seed(words: Vec<String>, seed: u64) -> Self {
        Self {
            words,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    // == Pick Random ==
    /// Returns a uniformly chosen word.
    ///
    /// Fails with [`ServiceError::EmptyWordStore`] when there is nothing to
    /// choose from.
    pub fn pick_random(&self) -> Result<String> {
        if self.words.is_empty() {
            return Err(ServiceError::EmptyWordStore);
        }
        let index = self.rng.lock().random_range(0..self.words.len());
        Ok(self.words[index].clone())
    }

    /// Returns true if the store holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }
}
