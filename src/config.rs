//! Project configuration.
//!
//! Every path the commands touch (site source, build output, routes file,
//! database, plugin directory) lives in one [`SiteConfig`] value that is
//! passed to each command at invocation. Nothing reads these locations from
//! process-wide state, so tests can point a command at temporary paths
//! without any setup beyond building the struct.
//!
//! ## Config File
//!
//! `sitekit.toml` in the project root overrides the stock defaults. The file
//! is optional and sparse — set just the values you want:
//!
//! ```toml
//! # All options are optional - defaults shown below
//! site_dir = "site"                 # Source tree for build and routes
//! output_dir = "dist"               # Replaced wholesale on every build
//! routes_file = "routes.json"       # Generated route list
//! database_path = "data/database.db"
//! plugin_dir = "plugins"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional config file in the project root.
pub const CONFIG_FILENAME: &str = "sitekit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Paths for one project, loaded from `sitekit.toml`.
///
/// All fields have defaults; user config files need only specify the values
/// they want to override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site source directory — the tree `build` copies and `routes` walks.
    pub site_dir: PathBuf,
    /// Build output directory, fully replaced on every `build`.
    pub output_dir: PathBuf,
    /// Where the generated route list is written.
    pub routes_file: PathBuf,
    /// SQLite database location. The parent directory must already exist.
    pub database_path: PathBuf,
    /// Directory scanned for plugin libraries.
    pub plugin_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("site"),
            output_dir: PathBuf::from("dist"),
            routes_file: PathBuf::from("routes.json"),
            database_path: PathBuf::from("data/database.db"),
            plugin_dir: PathBuf::from("plugins"),
        }
    }
}

impl SiteConfig {
    /// Load config from `<root>/sitekit.toml`, or stock defaults if the file
    /// doesn't exist.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate path values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, path) in [
            ("site_dir", &self.site_dir),
            ("output_dir", &self.output_dir),
            ("routes_file", &self.routes_file),
            ("database_path", &self.database_path),
            ("plugin_dir", &self.plugin_dir),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!("{field} must not be empty")));
            }
        }
        if self.site_dir == self.output_dir {
            return Err(ConfigError::Validation(
                "site_dir and output_dir must differ".into(),
            ));
        }
        Ok(())
    }
}
