//! Test logging initialization shared by unit and integration tests.
//!
//! Level precedence: `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
//! Set `TEST_LOG_JSON=1` to get the same JSON lines the server emits.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

fn filter() -> EnvFilter {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Idempotent; never panics if a subscriber is already installed.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let json = std::env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1");
        let builder = fmt()
            .with_env_filter(filter())
            .with_test_writer()
            .without_time();

        if json {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
