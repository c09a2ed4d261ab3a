use crate::category::Category;
use crate::config::AnalyticsConfig;
use crate::error::{AnalyticsError, Result};
use crate::plugin::{AnalyticsPlugin, CategoryPlugin, PluginDescriptor, PluginHandle};
use crate::plugins;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Plugin lookups the dispatcher relies on
pub trait PluginLookup: Send + Sync {
    /// Default plugin registered for `category`
    fn default_plugin_for_category(&self, category: Category) -> Option<PluginHandle>;

    /// Plugin registered under `key`, whatever its category
    fn plugin_by_key(&self, key: &str) -> Option<PluginHandle>;
}

#[derive(Default)]
struct RegistryState {
    plugins: HashMap<String, PluginHandle>,
    order: Vec<String>,
    defaults: HashMap<Category, String>,
}

impl RegistryState {
    fn first_of_category(&self, category: Category) -> Option<&String> {
        self.order
            .iter()
            .find(|key| self.plugins.get(*key).map(|p| p.category()) == Some(category))
    }
}

/// Registry for managing plugins in the process
#[derive(Default)]
pub struct PluginRegistry {
    state: RwLock<RegistryState>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry holding the plugins named in `config`
    pub fn from_config(config: &AnalyticsConfig) -> Result<Self> {
        config.validate()?;

        let registry = Self::new();
        for spec in &config.plugins {
            registry.register_analytics_plugin(plugins::build(spec)?)?;
        }

        if let Some(key) = &config.default_plugin {
            registry.set_default(Category::Analytics, key)?;
        }

        Ok(registry)
    }

    /// Register a plugin able to record analytics events
    pub fn register_analytics_plugin(&self, plugin: Arc<dyn AnalyticsPlugin>) -> Result<()> {
        let descriptor = plugin.descriptor();
        if descriptor.category != Category::Analytics {
            return Err(AnalyticsError::CategoryMismatch {
                key: descriptor.key.clone(),
                expected: Category::Analytics,
                actual: descriptor.category,
            });
        }

        self.register(PluginHandle::Analytics(plugin))
    }

    /// Register a plugin without the record capability
    pub fn register_plugin(&self, plugin: Arc<dyn CategoryPlugin>) -> Result<()> {
        self.register(PluginHandle::Other(plugin))
    }

    fn register(&self, handle: PluginHandle) -> Result<()> {
        let descriptor = handle.descriptor().clone();
        descriptor.validate()?;

        let mut state = self.write();
        if state.plugins.contains_key(&descriptor.key) {
            return Err(AnalyticsError::DuplicatePlugin {
                key: descriptor.key,
            });
        }

        state
            .defaults
            .entry(descriptor.category)
            .or_insert_with(|| descriptor.key.clone());
        state.order.push(descriptor.key.clone());
        state.plugins.insert(descriptor.key.clone(), handle);

        tracing::info!(
            "Registered {} plugin: {} v{} ({})",
            descriptor.category,
            descriptor.name,
            descriptor.version,
            descriptor.key
        );
        Ok(())
    }

    /// Unregister a plugin by key, returning its handle
    pub fn unregister(&self, key: &str) -> Result<PluginHandle> {
        let mut state = self.write();

        let handle = state
            .plugins
            .remove(key)
            .ok_or_else(|| AnalyticsError::UnknownPlugin {
                key: key.to_string(),
            })?;
        state.order.retain(|k| k != key);

        let category = handle.category();
        if state.defaults.get(&category).map(String::as_str) == Some(key) {
            let next = state.first_of_category(category).cloned();
            match next {
                Some(next) => {
                    tracing::debug!("Promoted '{}' to default {} plugin", next, category);
                    state.defaults.insert(category, next);
                }
                None => {
                    state.defaults.remove(&category);
                }
            }
        }

        tracing::info!("Unregistered plugin: {}", key);
        Ok(handle)
    }

    /// Make `key` the default plugin for `category`
    pub fn set_default(&self, category: Category, key: &str) -> Result<()> {
        let mut state = self.write();

        let actual = state
            .plugins
            .get(key)
            .map(|p| p.category())
            .ok_or_else(|| AnalyticsError::UnknownPlugin {
                key: key.to_string(),
            })?;
        if actual != category {
            return Err(AnalyticsError::CategoryMismatch {
                key: key.to_string(),
                expected: category,
                actual,
            });
        }

        state.defaults.insert(category, key.to_string());
        Ok(())
    }

    /// Key of the default plugin for `category`
    pub fn default_key(&self, category: Category) -> Option<String> {
        self.read().defaults.get(&category).cloned()
    }

    /// Descriptors of all registered plugins, in registration order
    pub fn plugins(&self) -> Vec<PluginDescriptor> {
        let state = self.read();
        state
            .order
            .iter()
            .filter_map(|key| state.plugins.get(key))
            .map(|p| p.descriptor().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flush every analytics plugin, stopping at the first failure
    pub fn flush_all(&self) -> Result<()> {
        let analytics: Vec<Arc<dyn AnalyticsPlugin>> = {
            let state = self.read();
            state
                .order
                .iter()
                .filter_map(|key| state.plugins.get(key))
                .filter_map(|p| p.as_analytics().cloned())
                .collect()
        };

        for plugin in analytics {
            plugin.flush()?;
        }
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PluginLookup for PluginRegistry {
    fn default_plugin_for_category(&self, category: Category) -> Option<PluginHandle> {
        let state = self.read();
        state
            .defaults
            .get(&category)
            .and_then(|key| state.plugins.get(key))
            .cloned()
    }

    fn plugin_by_key(&self, key: &str) -> Option<PluginHandle> {
        self.read().plugins.get(key).cloned()
    }
}
