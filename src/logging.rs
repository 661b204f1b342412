//! Stderr logging for the CLI.
//!
//! `RUST_LOG` selects the filter; the default shows warnings only so the
//! localized progress lines on stdout stay readable. `RUST_LOG=info` (or
//! `debug`) surfaces the engine's connection and transfer logs.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
