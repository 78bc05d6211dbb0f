use crate::config::AppSettings;
use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix of the daily log files.
pub const LOG_PREFIX: &str = "qladmin";

/// Where log events go besides the daily file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogOutputs {
    /// Mirror events to stdout with colors
    pub console: bool,
    /// One JSON object per line in the file instead of plain text
    pub json_file: bool,
}

fn ensure_log_dir(log_dir: &Utf8Path) -> Result<()> {
    if !log_dir.is_dir() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise debug or info.
fn level_filter(debug_mode: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug_mode { "debug" } else { "info" }))
}

/// Install the global subscriber: a daily-rotated file under `log_dir`
/// plus whatever `outputs` asks for.
///
/// # Arguments
/// * `log_dir` - Directory for log files, created if missing
/// * `log_prefix` - File name prefix, e.g. "qladmin" gives `qladmin.2026-10-18`
/// * `debug_mode` - Debug level instead of info when `RUST_LOG` is unset
///
/// # Returns
/// The file writer's guard. Dropping it flushes and stops file logging, so
/// hold it until shutdown.
pub fn setup_logging(
    log_dir: &Utf8Path,
    log_prefix: &str,
    debug_mode: bool,
    outputs: LogOutputs,
) -> Result<WorkerGuard> {
    ensure_log_dir(log_dir)?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, log_prefix));

    let plain_file = (!outputs.json_file).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(file_writer.clone())
            .with_ansi(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
    });
    let json_file = outputs.json_file.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(file_writer.clone())
            .with_current_span(false)
            .with_thread_ids(true)
    });
    let console = outputs
        .console
        .then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(level_filter(debug_mode))
        .with(plain_file)
        .with(json_file)
        .with(console)
        .try_init()
        .context("Failed to install the log subscriber")?;

    tracing::info!(
        "Logging to {}/{}.* (debug={}, {:?})",
        log_dir,
        log_prefix,
        debug_mode,
        outputs
    );

    Ok(guard)
}

/// Install logging as the bootstrap settings describe.
pub fn setup_from_settings(settings: &AppSettings) -> Result<WorkerGuard> {
    setup_logging(
        Utf8Path::new(&settings.log_dir),
        LOG_PREFIX,
        settings.debug,
        LogOutputs {
            console: settings.console_log,
            json_file: settings.json_logs,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn temp_log_dir() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(temp_dir.path().join("logs")).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_setup_creates_log_directory() {
        let (_temp_dir, log_dir) = temp_log_dir();

        // Another test in this binary may already own the global subscriber;
        // the directory is created before that is checked
        let _ = setup_logging(&log_dir, "test", false, LogOutputs::default());

        assert!(log_dir.is_dir());
    }

    #[test]
    fn test_ensure_log_dir_nested() {
        let (_temp_dir, log_dir) = temp_log_dir();
        let nested = log_dir.join("a").join("b");

        ensure_log_dir(&nested).unwrap();
        ensure_log_dir(&nested).unwrap();

        assert!(nested.is_dir());
    }
}
