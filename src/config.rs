//! Configuration for the search host, stored as TOML.
//!
//! ```toml
//! [settings]
//! radiantweb_problog_enabled = true
//! radiantweb_problog_posturl = "/blog"
//!
//! [modules]
//! installed = ["Radiantweb.Problog"]
//!
//! [aggregator]
//! timeout_ms = 2000
//! max_results = 50
//!
//! [store]
//! database_path = "/var/lib/sitesearch/posts.db"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sitesearch_providers::{MemorySettings, SettingValue, StaticModuleRegistry};

use crate::error::{Result, SiteSearchError};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSearchConfig {
    /// Provider options, keyed by option name. Unset options fall back to
    /// each provider's defaults.
    pub settings: BTreeMap<String, SettingValue>,
    /// Content modules installed in the host.
    pub modules: ModulesConfig,
    /// Fan-out and merge behaviour.
    pub aggregator: AggregatorConfig,
    /// Post database location.
    pub store: StoreConfig,
}

/// Installed content modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    pub installed: Vec<String>,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            installed: vec![sitesearch_providers::providers::problog::MODULE_ID.to_string()],
        }
    }
}

/// Aggregator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Per-provider deadline in milliseconds. Providers that miss it
    /// contribute nothing.
    pub timeout_ms: u64,
    /// Maximum number of merged entries returned.
    pub max_results: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 2_000,
            max_results: 50,
        }
    }
}

/// Post store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_data_dir().join("posts.db"),
        }
    }
}

impl SiteSearchConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SiteSearchError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SiteSearchError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/sitesearch/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("sitesearch").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("sitesearch")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/sitesearch-config/config.toml")
        }
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `aggregator.timeout_ms` must be greater than 0
    /// - `aggregator.max_results` must be greater than 0
    pub fn validate(&self) -> Result<()> {
        if self.aggregator.timeout_ms == 0 {
            return Err(SiteSearchError::Config(
                "aggregator.timeout_ms must be greater than 0".into(),
            ));
        }
        if self.aggregator.max_results == 0 {
            return Err(SiteSearchError::Config(
                "aggregator.max_results must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Settings store seeded from the `[settings]` table.
    pub fn settings_store(&self) -> MemorySettings {
        self.settings
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Module registry built from `[modules].installed`.
    pub fn module_registry(&self) -> StaticModuleRegistry {
        StaticModuleRegistry::new(self.modules.installed.iter().cloned())
    }
}

fn default_data_dir() -> PathBuf {
    if let Some(data) = std::env::var_os("XDG_DATA_HOME") {
        PathBuf::from(data).join("sitesearch")
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("sitesearch")
    } else {
        PathBuf::from("/tmp/sitesearch-data")
    }
}
