//! Logging setup for embedding applications.
//!
//! The engine logs through `tracing` throughout: fetch attempts and
//! retries, cache evictions, layer switches. Hosts that install their
//! own subscriber get all of it for free; `init_logging` is a
//! convenience for hosts that do not.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Installs a global console subscriber with compact per-line output.
///
/// The filter defaults to `info` and is overridable through the
/// `RUST_LOG` environment variable.
///
/// # Errors
///
/// Fails when a global subscriber is already set; the existing
/// subscriber stays in place.
pub fn init_logging() -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init()
}
