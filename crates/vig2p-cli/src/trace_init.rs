use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

pub const TRACE_FILE: &str = "vig2p-trace.jsonl";

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("vig2p_core=debug,vig2p_cli=debug")
        } else {
            EnvFilter::new("vig2p_core=warn,vig2p_cli=info")
        }
    })
}

/// Install the global subscriber.
///
/// With `log_dir` every event goes to `log_dir/vig2p-trace.jsonl` as JSON
/// lines, and the returned guard must be held until exit so the writer
/// flushes. Otherwise events are printed to stderr.
pub fn init_tracing(log_dir: Option<&Path>, verbose: bool) -> io::Result<Option<WorkerGuard>> {
    let Some(log_dir) = log_dir else {
        // A second install (tests, embedding) keeps the first subscriber.
        let _ = tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_target(false)
            .with_env_filter(default_filter(verbose))
            .try_init();
        return Ok(None);
    };

    fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, TRACE_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_names(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(default_filter(verbose))
        .try_init();
    Ok(Some(guard))
}
