//! Structured JSON logging initializer shared by the workspace's binaries and tests.

#![deny(unsafe_code)]

use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Initialize structured JSON logging with an env filter.
///
/// Honors `RUST_LOG`, e.g. `"info,schema=debug"`. Safe to call more than
/// once per process; later calls are no-ops if a global subscriber is
/// already installed.
pub fn init_json_logging() {
    let fmt_layer = fmt::layer().json().with_current_span(true).with_span_list(true);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default().with(filter).with(fmt_layer);
    let _ = tracing::subscriber::set_global_default(subscriber);
}
