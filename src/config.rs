//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--theme`, `--no-icons`, `--expanded`)
//! 2. Explicit `--config <file>`
//! 3. `$PKGTREE_CONFIG` environment variable (path to config file)
//! 4. Project-local `.pkgtree.toml` in the current working directory
//! 5. Global `~/.config/pkgtree/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable mouse capture: the wheel moves the row cursor and a left
    /// click activates the tree row under it.
    pub mouse: Option<bool>,
}

/// Tree panel settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TreeConfig {
    /// Expand every directory when a version is loaded.
    pub start_expanded: Option<bool>,
    /// Expand the ancestors of the current file whenever it changes.
    pub reveal_current: Option<bool>,
    /// Use nerd font icons (false = ASCII fallback).
    pub use_icons: Option<bool>,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: Option<bool>,
    /// Filter directive, e.g. "info" or "pkgtree=debug".
    pub level: Option<String>,
    /// Log file path; defaults to the cache directory.
    pub file: Option<PathBuf>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub tree_fg: Option<String>,
    pub tree_current_bg: Option<String>,
    pub tree_current_fg: Option<String>,
    pub tree_dir_fg: Option<String>,
    pub tree_file_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub tree: TreeConfig,
    pub logging: LoggingConfig,
    pub theme: ThemeConfig,
}

/// Default log filter directive.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path, which is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("PKGTREE_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".pkgtree.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("pkgtree").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr,
/// since logging is configured from the result).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                mouse: other.general.mouse.or(self.general.mouse),
            },
            tree: TreeConfig {
                start_expanded: other.tree.start_expanded.or(self.tree.start_expanded),
                reveal_current: other.tree.reveal_current.or(self.tree.reveal_current),
                use_icons: other.tree.use_icons.or(self.tree.use_icons),
            },
            logging: LoggingConfig {
                enabled: other.logging.enabled.or(self.logging.enabled),
                level: other.logging.level.clone().or(self.logging.level),
                file: other.logging.file.clone().or(self.logging.file),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: other.theme.custom.clone().or(self.theme.custom),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk lowest priority first so higher-priority files overwrite.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    pub fn mouse_enabled(&self) -> bool {
        self.general.mouse.unwrap_or(false)
    }

    pub fn start_expanded(&self) -> bool {
        self.tree.start_expanded.unwrap_or(false)
    }

    pub fn reveal_current(&self) -> bool {
        self.tree.reveal_current.unwrap_or(true)
    }

    pub fn use_icons(&self) -> bool {
        self.tree.use_icons.unwrap_or(true)
    }

    pub fn logging_enabled(&self) -> bool {
        self.logging.enabled.unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Log file path, falling back to `<cache dir>/pkgtree/pkgtree.log`.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging.file.clone().or_else(|| {
            dirs::cache_dir().map(|dir| dir.join("pkgtree").join("pkgtree.log"))
        })
    }

    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}
