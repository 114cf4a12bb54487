//! JSON trace file for conversion diagnostics.
//!
//! With the `trace` feature, [`init_tracing`] installs a global subscriber that
//! appends one JSON object per event and closed span to
//! `<log_dir>/morse-engine.jsonl`. Without the feature it does nothing.

use std::path::Path;

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "morse_core=debug,morse_engine=debug";

/// File name of the trace log inside `log_dir`.
pub const TRACE_FILE: &str = "morse-engine.jsonl";

/// Install the JSON trace subscriber. Only the first call has an effect.
pub fn init_tracing(log_dir: &Path) {
    #[cfg(feature = "trace")]
    json_file::install(log_dir);
    #[cfg(not(feature = "trace"))]
    let _ = log_dir;
}

#[cfg(feature = "trace")]
mod json_file {
    use std::path::Path;
    use std::sync::OnceLock;

    use tracing_appender::non_blocking::WorkerGuard;
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    use super::{DEFAULT_DIRECTIVES, TRACE_FILE};

    // Never dropped: buffered events are flushed by the worker thread.
    static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

    pub(super) fn install(log_dir: &Path) {
        GUARD.get_or_init(|| {
            let appender = tracing_appender::rolling::never(log_dir, TRACE_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

            // Fails only if another global subscriber is already set.
            let _ = tracing_subscriber::fmt()
                .json()
                .with_current_span(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_env_filter(filter)
                .with_writer(writer)
                .try_init();
            guard
        });
    }
}
