use super::{logging::LoggingConfig, process::ProcessConfig, traits::ConfigSection};
use crate::error::GeneCoreError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Prefix for environment overrides, e.g. `GENECORE__PROCESS__POPULATION_SIZE=200`.
pub const ENV_PREFIX: &str = "GENECORE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub process: ProcessConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GeneCoreError> {
        self.process.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, AppConfig>, GeneCoreError> {
        self.config
            .read()
            .map_err(|_| GeneCoreError::Configuration("Config lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, AppConfig>, GeneCoreError> {
        self.config
            .write()
            .map_err(|_| GeneCoreError::Configuration("Config lock poisoned".to_string()))
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GeneCoreError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GeneCoreError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| GeneCoreError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        *self.write()? = config;
        Ok(())
    }

    /// Defaults, then the optional file, then `GENECORE__*` environment variables.
    pub fn load_layered<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), GeneCoreError> {
        let defaults = config::Config::try_from(&AppConfig::default())?;
        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(true));
        }

        let config: AppConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;

        *self.write()? = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GeneCoreError> {
        let config = self.read()?;
        let toml_str = toml::to_string_pretty(&*config)
            .map_err(|e| GeneCoreError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| GeneCoreError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, GeneCoreError> {
        Ok(self.read()?.clone())
    }

    /// Apply `f` and keep the result only if it validates.
    pub fn update<F>(&self, f: F) -> Result<(), GeneCoreError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.write()?;
        let mut updated = config.clone();
        f(&mut updated);
        updated.validate()?;
        *config = updated;
        Ok(())
    }
}
