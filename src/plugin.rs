//! Plugin traits and the handles the registry hands out.

use crate::category::Category;
use crate::error::{AnalyticsError, Result};
use crate::event::AnalyticsEvent;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Metadata every plugin exposes to the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub key: String,
    pub name: String,
    pub version: Version,
    pub category: Category,
}

impl PluginDescriptor {
    pub fn new(key: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            version: Version::new(0, 1, 0),
            category,
        }
    }

    /// Check the descriptor is usable for registration
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(AnalyticsError::InvalidDescriptor {
                reason: "plugin key cannot be empty".to_string(),
            });
        }

        if self.name.trim().is_empty() {
            return Err(AnalyticsError::InvalidDescriptor {
                reason: format!("plugin '{}' has an empty name", self.key),
            });
        }

        Ok(())
    }
}

/// Core trait that all plugins implement
pub trait CategoryPlugin: Send + Sync {
    fn descriptor(&self) -> &PluginDescriptor;
}

/// Plugins able to record analytics events
pub trait AnalyticsPlugin: CategoryPlugin {
    /// Record a single event. Errors are returned to the caller untouched.
    fn record(&self, event: AnalyticsEvent) -> Result<()>;

    /// Push out anything the plugin buffers
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// A registered plugin, tagged with what it can do
#[derive(Clone)]
pub enum PluginHandle {
    Analytics(Arc<dyn AnalyticsPlugin>),
    Other(Arc<dyn CategoryPlugin>),
}

impl PluginHandle {
    pub fn descriptor(&self) -> &PluginDescriptor {
        match self {
            Self::Analytics(plugin) => plugin.descriptor(),
            Self::Other(plugin) => plugin.descriptor(),
        }
    }

    pub fn key(&self) -> &str {
        &self.descriptor().key
    }

    pub fn category(&self) -> Category {
        self.descriptor().category
    }

    /// The record capability, if this plugin has it
    pub fn as_analytics(&self) -> Option<&Arc<dyn AnalyticsPlugin>> {
        match self {
            Self::Analytics(plugin) => Some(plugin),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Debug for PluginHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Self::Analytics(_) => "Analytics",
            Self::Other(_) => "Other",
        };
        f.debug_struct("PluginHandle")
            .field("variant", &variant)
            .field("descriptor", self.descriptor())
            .finish()
    }
}
