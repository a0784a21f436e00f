//! Structured logging via `tracing`, written to a file because the
//! terminal belongs to the UI while the application runs.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::AppConfig;
use crate::error::{AppError, Result};

/// Environment variable that overrides the configured filter directive.
pub const LOG_ENV_VAR: &str = "PKGTREE_LOG";

/// Filter from `$PKGTREE_LOG`, else the configured level.
pub fn build_env_filter(config: &AppConfig) -> Result<EnvFilter> {
    let directive = std::env::var(LOG_ENV_VAR)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| config.log_level().to_string());
    EnvFilter::try_new(&directive)
        .map_err(|e| AppError::Logging(format!("invalid log filter {:?}: {}", directive, e)))
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::Logging(format!("failed to create log directory: {}", e))
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::Logging(format!("failed to open {}: {}", path.display(), e)))
}

/// Install the global subscriber. With logging disabled (or no resolvable
/// log path) nothing is installed and `tracing` macros are no-ops.
pub fn init_logging(config: &AppConfig) -> Result<()> {
    if !config.logging_enabled() {
        return Ok(());
    }
    let Some(path) = config.log_file() else {
        return Ok(());
    };

    let filter = build_env_filter(config)?;
    let file = open_log_file(&path)?;

    Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
