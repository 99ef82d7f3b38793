//! Structured logging with tracing
//!
//! Resolution and construction narrate themselves through `tracing` events.
//! Test binaries that want to see them call [`init_test_logging`] once; the
//! `INJECTED_LOG` environment variable overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Initialize logging for a test run
///
/// Idempotent: repeated calls (one per `#[test]`) leave the first
/// subscriber installed. Output goes through the test writer so it is
/// captured per test case.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_env("INJECTED_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init();
}
