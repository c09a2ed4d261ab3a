use crate::error::{AnalyticsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Analytics configuration, loaded from `analytics.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Key of the plugin used when a record call names none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_plugin: Option<String>,
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,
}

/// One analytics plugin to instantiate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub key: String,
    pub kind: PluginKind,
    /// Output file, required by the `file` kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Built-in analytics plugin kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PluginKind {
    #[serde(rename = "log")]
    Log,
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "file")]
    File,
}

fn default_enabled() -> bool {
    true
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_plugin: None,
            plugins: vec![PluginSpec {
                key: "console".to_string(),
                kind: PluginKind::Log,
                path: None,
            }],
        }
    }
}

impl AnalyticsConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path`
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading analytics config from {}", path.display());
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(
            "Loaded analytics config with {} plugin(s) from {}",
            config.plugins.len(),
            path.display()
        );
        Ok(config)
    }

    /// Load config from `path`, or fall back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        debug!("Config saved to {}", path.display());
        Ok(())
    }

    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("nova-analytics")
            .join("analytics.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for spec in &self.plugins {
            if spec.key.trim().is_empty() {
                return Err(AnalyticsError::Configuration {
                    reason: "plugin key cannot be empty".to_string(),
                });
            }

            if !seen.insert(spec.key.as_str()) {
                return Err(AnalyticsError::Configuration {
                    reason: format!("plugin '{}' is configured more than once", spec.key),
                });
            }

            if spec.kind == PluginKind::File && spec.path.is_none() {
                return Err(AnalyticsError::Configuration {
                    reason: format!("file plugin '{}' needs a path", spec.key),
                });
            }
        }

        if let Some(default) = &self.default_plugin {
            if !seen.contains(default.as_str()) {
                return Err(AnalyticsError::Configuration {
                    reason: format!("default plugin '{}' is not configured", default),
                });
            }
        }

        Ok(())
    }
}
