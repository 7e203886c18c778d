//! Configuration loading and management.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// Path to the `pattern,category` rules file.
    pub rules_path: PathBuf,

    /// Extra spellings to collapse, as `surface = "canonical"`.
    #[serde(default)]
    pub synonyms: BTreeMap<String, String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("rules_path", &self.rules_path)
            .field("synonyms", &self.synonyms.len())
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        let config_dir = dirs_config_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("mlog.db"),
            rules_path: config_dir.join("categories.csv"),
            synonyms: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (MLOG_*)
        figment = figment.merge(Env::prefixed("MLOG_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for mlog.
///
/// On Linux: `~/.config/mlog`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mlog"))
}

/// Returns the platform-specific data directory for mlog.
///
/// On Linux: `~/.local/share/mlog`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("mlog"))
}
