//! Analytics category dispatcher.
//!
//! Routes record calls to the analytics plugin picked either by the
//! category default or by an explicit plugin key, gated by an
//! enabled flag owned by the dispatcher instance.

use crate::category::Category;
use crate::config::AnalyticsConfig;
use crate::error::{AnalyticsError, PluginLookupKind, Result};
use crate::event::AnalyticsEvent;
use crate::registry::{PluginLookup, PluginRegistry};
use std::sync::{Arc, Mutex, PoisonError};

const CATEGORY: Category = Category::Analytics;

/// Entry point for recording analytics events
pub struct AnalyticsCategory {
    lookup: Arc<dyn PluginLookup>,
    enabled: Mutex<bool>,
}

impl AnalyticsCategory {
    /// Create an enabled dispatcher over `lookup`
    pub fn new(lookup: Arc<dyn PluginLookup>) -> Self {
        Self::with_enabled(lookup, true)
    }

    pub fn with_enabled(lookup: Arc<dyn PluginLookup>, enabled: bool) -> Self {
        Self {
            lookup,
            enabled: Mutex::new(enabled),
        }
    }

    /// Build the registry described by `config` and a dispatcher over it
    pub fn from_config(config: &AnalyticsConfig) -> Result<(Self, Arc<PluginRegistry>)> {
        let registry = Arc::new(PluginRegistry::from_config(config)?);
        let dispatcher = Self::with_enabled(registry.clone(), config.enabled);
        Ok((dispatcher, registry))
    }

    /// Record an event by name with the default analytics plugin
    pub fn record(&self, event_name: impl Into<String>) -> Result<()> {
        self.dispatch(PluginLookupKind::CategoryDefault(CATEGORY), || {
            AnalyticsEvent::new(event_name)
        })
    }

    /// Record an event by name with the plugin registered under `plugin_key`
    pub fn record_with_plugin(
        &self,
        event_name: impl Into<String>,
        plugin_key: &str,
    ) -> Result<()> {
        self.dispatch(PluginLookupKind::Key(plugin_key.to_string()), || {
            AnalyticsEvent::new(event_name)
        })
    }

    /// Record a prepared event with the default analytics plugin
    pub fn record_event(&self, event: AnalyticsEvent) -> Result<()> {
        self.dispatch(PluginLookupKind::CategoryDefault(CATEGORY), || event)
    }

    /// Record a prepared event with the plugin registered under `plugin_key`
    pub fn record_event_with_plugin(&self, event: AnalyticsEvent, plugin_key: &str) -> Result<()> {
        self.dispatch(PluginLookupKind::Key(plugin_key.to_string()), || event)
    }

    /// Enable collecting and sending analytics events
    pub fn enable(&self) {
        self.set_enabled(true);
    }

    /// Disable collecting and sending analytics events
    pub fn disable(&self) {
        self.set_enabled(false);
    }

    pub fn is_enabled(&self) -> bool {
        *self.enabled.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_enabled(&self, enabled: bool) {
        *self.enabled.lock().unwrap_or_else(PoisonError::into_inner) = enabled;
        tracing::debug!("Analytics {}", if enabled { "enabled" } else { "disabled" });
    }

    // The flag is read once here; lookup and the plugin call run without the lock.
    fn dispatch<F>(&self, lookup: PluginLookupKind, build_event: F) -> Result<()>
    where
        F: FnOnce() -> AnalyticsEvent,
    {
        if !self.is_enabled() {
            tracing::trace!("Analytics disabled, dropping event");
            return Ok(());
        }

        let handle = match &lookup {
            PluginLookupKind::CategoryDefault(category) => {
                self.lookup.default_plugin_for_category(*category)
            }
            PluginLookupKind::Key(key) => self.lookup.plugin_by_key(key),
        };

        let plugin = match handle.as_ref().and_then(|h| h.as_analytics()) {
            Some(plugin) => plugin,
            None => {
                tracing::warn!("No analytics plugin able to record events for {}", lookup);
                return Err(AnalyticsError::PluginNotFound { lookup });
            }
        };

        let event = build_event();
        tracing::debug!(
            "Recording event '{}' ({}) with plugin {}",
            event.name(),
            event.id(),
            plugin.descriptor().key
        );
        plugin.record(event)
    }
}
