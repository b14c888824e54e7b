//! Log setup for the binaries and tests.
//!
//! Logs go to stderr so rendered pages can be piped from stdout.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// level, e.g. `RUST_LOG=workday_cards=debug` to see every blank field.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Debug-level subscriber captured by the test harness. Safe to call from
/// every test.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
