//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use htransform_config::{Config, ServerConfig, TelemetryConfig};
use htransform_core::RawRule;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with no rules
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: SocketAddr::from(([127, 0, 0, 1], 0)),
                },
                telemetry: TelemetryConfig::default(),
                rules: Vec::new(),
            },
        }
    }

    /// Append a rule after the ones already added
    pub fn with_rule(mut self, rule: RawRule) -> Self {
        self.config.rules.push(rule);
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
