//! Tracing setup for the `bac` binary.
//!
//! Engine modules only emit events; installing a subscriber is the caller's
//! job. Events go to stderr because stdout carries results, including the
//! `--json` documents other tools parse.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the subscriber at `warn`, so only clamped inputs and similar
/// normalizations show up next to a result.
///
/// `RUST_LOG=bac_core=debug` exposes every intermediate Widmark value.
pub fn init() {
    init_with_level("warn")
}

/// Install the subscriber with `default_level` unless `RUST_LOG` is set.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route engine events into the test harness output at debug level.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
