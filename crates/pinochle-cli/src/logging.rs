use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt};

/// Keeps the non-blocking writer alive for the life of the process.
pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
}

/// Installs the global subscriber: JSON lines into `file` when given,
/// human-readable output on stderr otherwise. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init_logging(file: Option<&Path>) -> Result<LoggingGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file at {}", path.display()))?;
            let (writer, guard) = non_blocking::NonBlockingBuilder::default()
                .lossy(false)
                .finish(file);
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(filter)
                .json()
                .with_writer(writer)
                .finish();
            // Ignore the error if a subscriber is already set (tests).
            let _ = tracing::subscriber::set_global_default(subscriber);
            Ok(LoggingGuard {
                _guard: Some(guard),
            })
        }
        None => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish();
            let _ = tracing::subscriber::set_global_default(subscriber);
            Ok(LoggingGuard { _guard: None })
        }
    }
}
