//! Logging setup.
//!
//! Human-readable logs go to stderr so stdout stays clean for reports. When a
//! log path or directory is configured, the same events are also written as
//! JSON lines through a non-blocking file writer.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Explicit log file path.
pub const LOG_PATH_ENV: &str = "REPSTAT_LOG_PATH";

/// Log directory (file name defaults to [`DEFAULT_LOG_FILE`]).
pub const LOG_DIR_ENV: &str = "REPSTAT_LOG_DIR";

/// File name used when only a directory is configured.
pub const DEFAULT_LOG_FILE: &str = "repstat.jsonl";

/// Where, if anywhere, JSONL logs are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact log file path. Wins over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Directory receiving [`DEFAULT_LOG_FILE`].
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read `REPSTAT_LOG_PATH` / `REPSTAT_LOG_DIR`, falling back to the
    /// configured `log_dir`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self {
            log_path: std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            log_dir: std::env::var_os(LOG_DIR_ENV)
                .map(PathBuf::from)
                .or(config_log_dir),
        }
    }

    /// Directory and file name of the JSONL log, if file logging is enabled.
    pub fn log_file(&self) -> Option<(PathBuf, String)> {
        if let Some(ref path) = self.log_path {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            let name = path
                .file_name()
                .map_or_else(|| DEFAULT_LOG_FILE.to_string(), |n| n.to_string_lossy().into_owned());
            return Some((dir, name));
        }
        self.log_dir
            .as_ref()
            .map(|dir| (dir.clone(), DEFAULT_LOG_FILE.to_string()))
    }
}

/// Filter directive for the given verbosity flags.
///
/// `-q` wins over `-v`; each `-v` raises the level one step above the
/// configured default.
pub fn filter_directive(quiet: bool, verbose: u8, default_level: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => default_level.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Build the event filter. `RUST_LOG` applies unless `-q` or `-v` was given.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if !quiet
        && verbose == 0
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(filter_directive(quiet, verbose, default_level))
}

/// Install the global subscriber.
///
/// Hold the returned guard until exit so buffered file logs are flushed.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, guard) = match config.log_file() {
        Some((dir, name)) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(&dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("global tracing subscriber already installed")?;

    Ok(guard)
}
