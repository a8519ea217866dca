//! Tracing / logging initialisation helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

/// Log level per component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Global default level: "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_level")]
    pub level: String,
    /// Override per component: crate name → level, e.g. `ethercodec-abi = "trace"`
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    /// Emit JSON structured logs (true) or human-readable text (false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            components: BTreeMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Set the level for one component.
    pub fn with_component(mut self, component: impl Into<String>, level: impl Into<String>) -> Self {
        self.components.insert(component.into(), level.into());
        self
    }

    /// The `EnvFilter` directive string, e.g. `info,ethercodec_abi=trace`.
    pub fn directives(&self) -> String {
        let mut directives = self.level.clone();
        for (component, level) in &self.components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }

    /// The filter for these directives, falling back to `info` when they
    /// do not parse.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.directives()).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Install the global subscriber described by `config`.
///
/// Call once at startup; a second call returns an error and leaves the
/// first subscriber in place.
pub fn init_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    let filter = config.env_filter();
    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_include_components() {
        let config = LogConfig::default()
            .with_component("ethercodec-tx", "debug")
            .with_component("ethercodec-abi", "trace");
        assert_eq!(
            config.directives(),
            "info,ethercodec_abi=trace,ethercodec_tx=debug"
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: LogConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LogConfig::default());

        let config: LogConfig =
            serde_json::from_str(r#"{"level": "warn", "json": true, "components": {"ethercodec-rlp": "trace"}}"#)
                .unwrap();
        assert!(config.json);
        assert_eq!(config.directives(), "warn,ethercodec_rlp=trace");
    }

    #[test]
    fn second_init_is_an_error() {
        let config = LogConfig::default();
        init_tracing(&config).unwrap();
        assert!(init_tracing(&config).is_err());
    }
}
