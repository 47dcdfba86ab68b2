//! Tracing setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once per process; honors
/// `RUST_LOG` and defaults to `info`.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
