//! Process-wide `tracing` setup: a compact stderr layer plus, when a log file
//! is given, a JSON layer written through a daily-rotated appender.

use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{CatalogError, Result};

const DEFAULT_LOG_FILE_NAME: &str = "event-catalog.log";

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the default filter. Fails when the log directory or
/// file cannot be created, or when a subscriber is already installed.
pub fn init(verbose: bool, log_file: Option<PathBuf>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let file_layer = match log_file {
        Some(path) => Some(
            fmt::layer()
                .with_writer(file_appender(&path)?)
                .with_ansi(false)
                .json(),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CatalogError::Config(format!("logging already initialised: {}", e)))
}

/// Daily-rotated appender writing `<dir>/<name>.<date>` for `path`.
fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let prefix = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string());

    std::fs::create_dir_all(dir).map_err(|e| {
        CatalogError::Config(format!("cannot create log directory {}: {}", dir.display(), e))
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .build(dir)
        .map_err(|e| CatalogError::Config(format!("cannot open log file {}: {}", path.display(), e)))
}

/// Filter used when `RUST_LOG` is unset. HTTP request spans from tower-http
/// follow the same level as the crate.
fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("event_catalog={level},tower_http={level}")
}
