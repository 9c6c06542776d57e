//! Text exposition of the counters, one sample per line.

use std::fmt::Write;

use super::{Counter, MetricsSnapshot};

const REQ_FAMILY: &str = "word_shuffle_req";

/// Renders `snapshot` for scraping.
///
/// CRUD counters share the `word_shuffle_req` family with a `method` label;
/// the others are families of their own.
pub fn render_exposition(snapshot: &MetricsSnapshot) -> String {
    let mut out = String::with_capacity(640);

    family_header(
        &mut out,
        REQ_FAMILY,
        "Number of the requests to the API by type",
    );
    for counter in [
        Counter::Create,
        Counter::Read,
        Counter::Update,
        Counter::Delete,
    ] {
        let _ = writeln!(
            out,
            "{}{{method=\"{}\"}} {}",
            REQ_FAMILY,
            counter.as_str(),
            snapshot.value(counter)
        );
    }

    for (counter, help) in [
        (Counter::Errors, "Number of the raised errors"),
        (Counter::Warnings, "Number of the raised warnings"),
        (Counter::Index, "Number of the requests to /"),
    ] {
        let name = format!("word_shuffle_{}", counter.as_str());
        family_header(&mut out, &name, help);
        let _ = writeln!(out, "{} {}", name, snapshot.value(counter));
    }

    out
}

fn family_header(out: &mut String, name: &str, help: &str) {
    let _ = writeln!(out, "# TYPE {} counter", name);
    let _ = writeln!(out, "# HELP {}", help);
}
