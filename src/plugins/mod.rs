//! Built-in analytics plugins.
//!
//! Each plugin can be registered by hand or instantiated from a
//! [`PluginSpec`] in the analytics configuration.

pub mod file;
pub mod log;
pub mod memory;

pub use file::FileAnalyticsPlugin;
pub use log::LogAnalyticsPlugin;
pub use memory::MemoryAnalyticsPlugin;

use crate::config::{PluginKind, PluginSpec};
use crate::error::{AnalyticsError, Result};
use crate::plugin::AnalyticsPlugin;
use std::sync::Arc;

/// Instantiate the plugin described by `spec`
pub fn build(spec: &PluginSpec) -> Result<Arc<dyn AnalyticsPlugin>> {
    let plugin: Arc<dyn AnalyticsPlugin> = match spec.kind {
        PluginKind::Log => Arc::new(LogAnalyticsPlugin::new(&spec.key)),
        PluginKind::Memory => Arc::new(MemoryAnalyticsPlugin::new(&spec.key)),
        PluginKind::File => {
            let path = spec.path.as_ref().ok_or_else(|| AnalyticsError::Configuration {
                reason: format!("file plugin '{}' needs a path", spec.key),
            })?;
            Arc::new(FileAnalyticsPlugin::open(&spec.key, path)?)
        }
    };
    Ok(plugin)
}
