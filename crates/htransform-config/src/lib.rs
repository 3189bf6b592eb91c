#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod server;
pub mod telemetry;

use htransform_core::RawRule;
use serde::Deserialize;

pub use server::*;
pub use telemetry::*;

/// Top-level htransform configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Header rules, applied in the order written
    #[serde(default)]
    pub rules: Vec<RawRule>,
}
