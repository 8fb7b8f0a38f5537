//! Logging bootstrap.
//!
//! A thin wrapper around `tracing_subscriber`, matching the teacher's
//! env-filter-plus-fmt-layer setup without its OpenTelemetry export path
//! (out of scope here). Not called automatically by the library — a binary
//! or test harness embedding this crate decides when to install a
//! subscriber.

use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber reading its filter from
/// `RUST_LOG`, defaulting to `execqueue=info` when unset.
///
/// Safe to call more than once; later calls are no-ops (the global
/// subscriber can only be set once per process).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("execqueue=info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
