//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::RouteSource;

/// Root configuration: one route set and how to log about it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Base URL route patterns are resolved against.
    pub base_url: String,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Top-level route definitions, in priority order.
    pub routes: Vec<RouteSource>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_string(),
            logging: LoggingConfig::default(),
            routes: Vec::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Pretty,
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: RoutesConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_url, "http://localhost");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config: RoutesConfig = toml::from_str(
            r#"
            base_url = "https://x.test"

            [logging]
            level = "debug"
            format = "compact"

            [[routes]]
            id = "home"
            url = "/"

            [[routes]]
            id = "group"

            [[routes.children]]
            id = "detail"
            url = "/group/:id"
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.routes.len(), 2);
        assert!(config.routes[1].url.is_none());
        assert_eq!(config.routes[1].children.as_ref().unwrap()[0].id, "detail");
    }
}
