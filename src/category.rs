use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories of plugin functionality
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "analytics")]
    Analytics,
    #[serde(rename = "api")]
    Api,
    #[serde(rename = "auth")]
    Auth,
    #[serde(rename = "storage")]
    Storage,
    #[serde(rename = "hub")]
    Hub,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analytics => "analytics",
            Self::Api => "api",
            Self::Auth => "auth",
            Self::Storage => "storage",
            Self::Hub => "hub",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
