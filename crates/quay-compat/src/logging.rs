//! Tracing setup for binaries, examples and tests that link this crate.
//!
//! The library itself only emits `trace!` events; it never installs a
//! subscriber. Callers that want the events visible run [`init`] once.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber, honoring `QUAY_LOG` then `RUST_LOG`
/// and falling back to `default`. Safe to call more than once; later calls
/// are no-ops.
pub fn init(default: LevelFilter) {
    let filter = EnvFilter::try_from_env("QUAY_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default.to_string()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
