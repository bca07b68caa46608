//! Diagnostic logging to stderr.
//!
//! Verbosity comes from `RUST_LOG` (e.g. `RUST_LOG=shiftkeeper=debug`) and
//! defaults to warnings only, so normal command output stays clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
    // try_init: a second call keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
