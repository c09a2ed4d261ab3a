//! Error types for nova-analytics

use crate::category::Category;
use thiserror::Error;

/// Which lookup the dispatcher performed when routing an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginLookupKind {
    /// Default plugin registered for a category
    CategoryDefault(Category),
    /// Plugin addressed by its key
    Key(String),
}

impl std::fmt::Display for PluginLookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CategoryDefault(category) => write!(f, "the {} category", category),
            Self::Key(key) => write!(f, "analytics plugin '{}'", key),
        }
    }
}

/// Main error type for nova-analytics operations
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("a valid plugin is required: no analytics plugin able to record events for {lookup}")]
    PluginNotFound { lookup: PluginLookupKind },

    #[error("Plugin with key '{key}' is already registered")]
    DuplicatePlugin { key: String },

    #[error("Plugin '{key}' is not registered")]
    UnknownPlugin { key: String },

    #[error("Plugin '{key}' belongs to the {actual} category, expected {expected}")]
    CategoryMismatch {
        key: String,
        expected: Category,
        actual: Category,
    },

    #[error("Invalid plugin descriptor: {reason}")]
    InvalidDescriptor { reason: String },

    #[error("Plugin '{key}' failed: {reason}")]
    Plugin { key: String, reason: String },

    #[error("Invalid configuration: {reason}")]
    Configuration { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias for nova-analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
