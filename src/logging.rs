//! Diagnostic logging setup

use std::env;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter directives
pub const LOG_ENV_VAR: &str = "CHECK4DUPLICATES_LOG";

/// Install the global subscriber
///
/// Logs go to stderr so stdout carries only the user-facing messages. The
/// filter comes from `CHECK4DUPLICATES_LOG`, defaulting to `warn`, or `info`
/// when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    let filter = env::var(LOG_ENV_VAR).unwrap_or_else(|_| default_filter.to_string());
    let filter_layer =
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be set when embedded; keep that one
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter_layer)
        .try_init();
}
