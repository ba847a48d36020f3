//! Logging setup
//!
//! The library only emits `tracing` events. The binary installs a stderr
//! subscriber; the filter comes from `RUST_LOG` first, then `--verbose`,
//! then the configured level.

use tracing_subscriber::EnvFilter;

/// Build the log filter
pub fn build_filter(verbose: bool, configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { configured };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    })
}

/// Install the global stderr subscriber
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbose: bool, configured: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose, configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
