//! # nova-analytics
//!
//! Analytics category for NovaPcSuite: records events and routes them to
//! the analytics plugin registered for the category, or to a plugin named
//! by key.
//!
//! ## Features
//!
//! - **Dispatcher**: [`AnalyticsCategory`] with an enable/disable switch
//! - **Plugin Registry**: keyed plugins with a default per category
//! - **Built-in Plugins**: tracing log, in-memory and JSON lines file sinks
//! - **Configuration**: TOML file describing plugins and the default
//!
//! ## Quick Start
//!
//! ```rust
//! use nova_analytics::{AnalyticsCategory, AnalyticsEvent, PluginRegistry};
//! use nova_analytics::plugins::MemoryAnalyticsPlugin;
//! use std::sync::Arc;
//!
//! # fn main() -> nova_analytics::Result<()> {
//! let registry = Arc::new(PluginRegistry::new());
//! let memory = Arc::new(MemoryAnalyticsPlugin::new("memory"));
//! registry.register_analytics_plugin(memory.clone())?;
//!
//! let analytics = AnalyticsCategory::new(registry);
//! analytics.record("app_opened")?;
//! analytics.record_event(AnalyticsEvent::new("purchase").with_property("sku", "A-100"))?;
//!
//! analytics.disable();
//! analytics.record("ignored")?;
//! assert_eq!(memory.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod logging;
pub mod plugin;
pub mod plugins;
pub mod registry;

// Re-export commonly used types
pub use category::Category;
pub use config::AnalyticsConfig;
pub use dispatcher::AnalyticsCategory;
pub use error::{AnalyticsError, PluginLookupKind, Result};
pub use event::AnalyticsEvent;
pub use plugin::{AnalyticsPlugin, CategoryPlugin, PluginDescriptor, PluginHandle};
pub use registry::{PluginLookup, PluginRegistry};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
