// Logging module - tracing subscriber setup
//
// Human-readable logs go to stderr so stdout stays clean for the rendered
// table. Optionally, a JSON log file is written in the background with
// rotation.
//
// Precedence: RUST_LOG env var > config file > default "info"

use crate::config::LoggingConfig;
use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive used when RUST_LOG is not set
pub fn default_directive(level: &str) -> String {
    format!("pathtrail={}", level)
}

/// Install the global subscriber
///
/// The returned guard must be kept alive for the duration of the program
/// so buffered file logs are flushed.
pub fn init(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level)));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Set up file logging if enabled (non-blocking writer with rotation)
    let (file_layer, guard) = if config.file_enabled {
        std::fs::create_dir_all(&config.file_dir).with_context(|| {
            format!(
                "Could not create log directory {}",
                config.file_dir.display()
            )
        })?;

        let file_appender = RollingFileAppender::new(
            config.file_rotation.into(),
            &config.file_dir,
            &config.file_prefix,
        );

        // Writes happen in a background thread; JSON for structured parsing
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
