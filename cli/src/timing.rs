//! Tracing setup for the CLI.
//!
//! Spans opened by `#[instrument]` on command entry points are reported with their
//! duration when `--timing` is set.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Installs the global subscriber. `RUST_LOG` still overrides the default level.
///
/// * `verbose` - debug level and event targets
/// * `timing` - span close events with durations (needs at least info)
pub fn init_tracing(verbose: bool, timing: bool) {
    let level = match (verbose, timing) {
        (true, _) => LevelFilter::DEBUG,
        (false, true) => LevelFilter::INFO,
        (false, false) => LevelFilter::WARN,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let span_events = if timing {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_level(true)
                .with_span_events(span_events)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
