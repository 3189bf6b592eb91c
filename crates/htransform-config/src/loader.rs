use std::path::Path;

use htransform_core::Dispatcher;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then parses
    /// and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, expansion or parsing
    /// fails, or any rule is rejected
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion or parsing fails, or any rule is rejected
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration can be activated
    ///
    /// # Errors
    ///
    /// Returns an error if the log filter is empty or any rule is rejected
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.telemetry.log_filter.trim().is_empty() {
            anyhow::bail!("telemetry.log_filter must not be empty");
        }

        self.dispatcher()?;

        Ok(())
    }

    /// Build the rule dispatcher for this configuration
    ///
    /// # Errors
    ///
    /// Returns the first rule rejected during the build
    pub fn dispatcher(&self) -> anyhow::Result<Dispatcher> {
        Dispatcher::build(&self.rules).map_err(|e| anyhow::anyhow!("invalid header rules: {e}"))
    }
}
