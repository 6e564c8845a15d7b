//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

static INIT: Once = Once::new();

/// Shape of log lines written to stderr.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    /// One JSON object per event, for log collectors.
    Json,
}

/// Initialize tracing with compact output. Safe to call multiple times.
pub fn init() {
    init_with(LogFormat::Compact);
}

/// Initialize tracing. Only the first call has any effect.
///
/// Output goes to stderr; stdout is reserved for the MCP transport and for
/// `query` command output.
pub fn init_with(format: LogFormat) {
    INIT.call_once(|| {
        let is_test =
            std::env::var("NEXTEST").is_ok() || std::env::var("CARGO_TARGET_TMPDIR").is_ok();
        let filter = EnvFilter::from_default_env().add_directive(
            if is_test {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            }
            .into(),
        );

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE);

        // Another harness may already own the global subscriber in tests.
        let result = match (is_test, format) {
            (true, _) => builder.compact().with_test_writer().try_init(),
            (false, LogFormat::Compact) => builder.compact().with_writer(std::io::stderr).try_init(),
            (false, LogFormat::Json) => builder.json().with_writer(std::io::stderr).try_init(),
        };
        if let Err(e) = result
            && !is_test
        {
            eprintln!("Failed to initialize tracing: {}", e);
        }
    });
}
