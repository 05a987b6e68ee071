//! Console logging
//!
//! Filtered through `RUST_LOG`, e.g. `RUST_LOG=tilt=debug` for structural
//! changes or `RUST_LOG=tilt::interaction=trace` for gestures. Warnings only
//! by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    if let Err(e) = tracing_subscriber::registry().with(console_layer).try_init() {
        eprintln!("Warning: logging already initialised: {}", e);
    }
}
