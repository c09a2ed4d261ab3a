use crate::category::Category;
use crate::error::Result;
use crate::event::AnalyticsEvent;
use crate::plugin::{AnalyticsPlugin, CategoryPlugin, PluginDescriptor};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Keeps recorded events in memory
pub struct MemoryAnalyticsPlugin {
    descriptor: PluginDescriptor,
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemoryAnalyticsPlugin {
    pub fn new(key: &str) -> Self {
        Self {
            descriptor: PluginDescriptor::new(key, "In-memory analytics", Category::Analytics),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of recorded events, oldest first
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AnalyticsEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CategoryPlugin for MemoryAnalyticsPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }
}

impl AnalyticsPlugin for MemoryAnalyticsPlugin {
    fn record(&self, event: AnalyticsEvent) -> Result<()> {
        self.lock().push(event);
        Ok(())
    }
}
