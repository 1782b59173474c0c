use std::fs::File;
use std::io;
use std::sync::OnceLock;

use notegraph_core::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Flushes the file writer when the process exits.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Install the global subscriber: stderr always, plus `cfg.file` if set.
///
/// `RUST_LOG` directives apply on top of the configured levels.
pub fn init(cfg: &LoggingConfig) -> io::Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(level_filter(&cfg.level, LevelFilter::INFO));

    let file_layer = match cfg.file {
        Some(ref path) => {
            let (writer, guard) = tracing_appender::non_blocking(File::create(path)?);
            let _ = FILE_GUARD.set(guard);

            let level = cfg.file_level.as_deref().unwrap_or(&cfg.level);
            Some(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(level_filter(level, LevelFilter::DEBUG)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();
    Ok(())
}

/// `level` as the default directive; unknown names fall back to `fallback`.
fn level_filter(level: &str, fallback: LevelFilter) -> EnvFilter {
    let default = level.parse::<LevelFilter>().unwrap_or(fallback);
    EnvFilter::builder().with_default_directive(default.into()).from_env_lossy()
}
