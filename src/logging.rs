use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::new(if verbose {
        "appearance=debug"
    } else {
        "appearance=info"
    })
}

/// Whether log events share stderr with the user-facing error line.
pub const fn writes_to_stderr(log_path: Option<&Path>) -> bool {
    log_path.is_none()
}

/// Initialize tracing, writing to `log_path` when given and stderr otherwise.
///
/// The returned guard must be held until exit so buffered file output is
/// flushed.
pub fn init(log_path: Option<&Path>, verbose: bool) -> Result<Option<WorkerGuard>> {
    let Some(log_path) = log_path else {
        tracing_subscriber::registry()
            .with(filter(verbose))
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .init();
        return Ok(None);
    };

    let parent = log_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .with_context(|| format!("Log path has no file name: {}", log_path.display()))?;
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;

    let file_appender = tracing_appender::rolling::never(parent, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(Some(guard))
}
