//! `dhset`: reads `+key`, `?key`, `-key` requests from stdin and answers
//! `OK` or `FAIL` on stdout. Logs go to stderr, filtered by `RUST_LOG`.

use dh_hashset::{command, DoubleHashSet};
use std::io::{self, BufWriter};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut set = DoubleHashSet::new();

    match command::run(stdin.lock(), BufWriter::new(stdout.lock()), &mut set) {
        Ok(stats) => tracing::debug!(
            executed = stats.executed,
            skipped = stats.skipped,
            len = set.len(),
            capacity = set.capacity(),
            "input exhausted"
        ),
        // Exit status stays zero; the error is only reported.
        Err(e) => tracing::error!(error = %e, "command loop stopped"),
    }
}
