//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

static INIT: Once = Once::new();

/// Initialize tracing. Safe to call multiple times.
///
/// Logs always go to stderr: stdout carries the MCP protocol.
pub fn init() {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let default_level = if is_test {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        let filter = EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy();

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE)
            .compact();

        let installed = if is_test {
            builder.with_test_writer().try_init()
        } else {
            builder.with_writer(std::io::stderr).try_init()
        };
        if let Err(e) = installed {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
