//! Shared helpers for the integration tests

use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test harness
///
/// Honours `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
