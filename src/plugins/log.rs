use crate::category::Category;
use crate::error::Result;
use crate::event::AnalyticsEvent;
use crate::plugin::{AnalyticsPlugin, CategoryPlugin, PluginDescriptor};

/// Emits every event as a tracing record
pub struct LogAnalyticsPlugin {
    descriptor: PluginDescriptor,
}

impl LogAnalyticsPlugin {
    pub fn new(key: &str) -> Self {
        Self {
            descriptor: PluginDescriptor::new(key, "Log analytics", Category::Analytics),
        }
    }
}

impl CategoryPlugin for LogAnalyticsPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }
}

impl AnalyticsPlugin for LogAnalyticsPlugin {
    fn record(&self, event: AnalyticsEvent) -> Result<()> {
        let properties = serde_json::to_string(event.properties())?;
        tracing::info!(
            plugin = %self.descriptor.key,
            id = %event.id(),
            timestamp = %event.timestamp().to_rfc3339(),
            "analytics event '{}' {}",
            event.name(),
            properties
        );
        Ok(())
    }
}
