//! Property-Based Tests for the Metrics Module
//!
//! Uses proptest to check that snapshots and the exposition account for
//! every increment.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::metrics::{Counter, Metrics};

// == Strategies ==
fn counter_strategy() -> impl Strategy<Value = Counter> {
    prop::sample::select(Counter::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of increments, each counter equals the number of
    // increments it received.
    #[test]
    fn prop_snapshot_counts_every_increment(ops in prop::collection::vec(counter_strategy(), 0..200)) {
        let metrics = Metrics::new();
        let mut expected: HashMap<Counter, u64> = HashMap::new();

        for counter in &ops {
            metrics.increment(*counter);
            *expected.entry(*counter).or_default() += 1;
        }

        let snapshot = metrics.snapshot();
        for counter in Counter::ALL {
            prop_assert_eq!(snapshot.value(counter), expected.get(&counter).copied().unwrap_or(0));
        }
    }

    // The exposition carries the same values as the snapshot.
    #[test]
    fn prop_exposition_matches_snapshot(ops in prop::collection::vec(counter_strategy(), 0..100)) {
        let metrics = Metrics::new();
        for counter in &ops {
            metrics.increment(*counter);
        }

        let snapshot = metrics.snapshot();
        let text = metrics.render_exposition();
        let read_line = format!("word_shuffle_req{{method=\"read\"}} {}", snapshot.read);
        let errors_line = format!("word_shuffle_errors {}", snapshot.errors);
        let index_line = format!("word_shuffle_index {}", snapshot.index);
        prop_assert!(text.lines().any(|l| l == read_line));
        prop_assert!(text.lines().any(|l| l == errors_line));
        prop_assert!(text.lines().any(|l| l == index_line));
    }
}
