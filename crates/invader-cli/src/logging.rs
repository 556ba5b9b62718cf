use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::script::LoggingConfig;

/// Keeps the background writer alive; dropping it flushes pending events.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init_logging(logging: &LoggingConfig) -> Result<LoggingGuard> {
    let (writer, guard) = match logging.file.as_deref() {
        Some(path) => open_log_file(path)?,
        None => non_blocking::NonBlockingBuilder::default()
            .lossy(false)
            .finish(std::io::stderr()),
    };

    let level = logging.level().unwrap_or(Level::WARN);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer);

    // A subscriber may already be installed when running under tests.
    let _ = if logging.json {
        tracing::subscriber::set_global_default(
            builder.json().with_current_span(false).finish(),
        )
    } else {
        tracing::subscriber::set_global_default(builder.with_ansi(false).finish())
    };

    Ok(LoggingGuard { _guard: guard })
}

fn open_log_file(path: &Path) -> Result<(NonBlocking, WorkerGuard)> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory at {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("creating log file at {}", path.display()))?;
    Ok(non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file))
}
