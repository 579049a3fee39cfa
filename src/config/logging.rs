use super::traits::ConfigSection;
use crate::error::GeneCoreError;
use serde::{Deserialize, Serialize};

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `env_logger` filter; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ConfigSection for LoggingConfig {
    fn section_name() -> &'static str {
        "logging"
    }

    fn validate(&self) -> Result<(), GeneCoreError> {
        if !LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            return Err(GeneCoreError::Configuration(format!(
                "Unknown log level '{}', expected one of {}",
                self.level,
                LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}
