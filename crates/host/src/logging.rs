//! Tracing subscriber configuration for the host binaries.
//!
//! The `pico_link` log macros route to `tracing` when its `std` feature is on,
//! so engine and transport messages land in the same subscriber.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Log level can be controlled via the `RUST_LOG` environment variable.
/// Defaults to `info` if not set.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Initialize the tracing subscriber for tests.
///
/// Uses `try_init` so repeated calls are harmless.
pub fn init_for_tests() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
