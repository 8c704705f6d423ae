//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! default every field so a minimal (or empty) file is valid.

use serde::{Deserialize, Serialize};

use crate::jsonp::Trigger;

/// Root configuration for the demo gateway binary.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// JSONP filter settings.
    pub jsonp: JsonpConfig,
}

/// Options of the JSONP filter. Fixed for the lifetime of a layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct JsonpConfig {
    /// What marks a request as a JSONP request.
    pub trigger: Trigger,

    /// Prefix wrapped output with `/**/` (Rosetta Flash mitigation).
    pub extra_security: bool,

    /// Upper bound when buffering a form body to look for `callback`.
    pub max_form_bytes: usize,
}

impl Default for JsonpConfig {
    fn default() -> Self {
        Self {
            trigger: Trigger::Extension,
            extra_security: false,
            max_form_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

impl JsonpConfig {
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn with_extra_security(mut self, enabled: bool) -> Self {
        self.extra_security = enabled;
        self
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.jsonp, JsonpConfig::default());
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_jsonp_section() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [jsonp]
            trigger = "callback"
            extra_security = true
            "#,
        )
        .unwrap();
        assert_eq!(config.jsonp.trigger, Trigger::Callback);
        assert!(config.jsonp.extra_security);
        assert_eq!(config.jsonp.max_form_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_unknown_trigger_is_rejected() {
        let result: Result<GatewayConfig, _> = toml::from_str("[jsonp]\ntrigger = \"header\"\n");
        assert!(result.is_err());
    }
}
