pub mod analysis;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod policy;
pub mod record;
pub mod scenarios;
pub mod scoring;
pub mod session;
pub mod state;
pub mod strategy;
pub mod types;

use tracing_subscriber::{EnvFilter, fmt};

/// Install the stderr log subscriber used by the binaries. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
