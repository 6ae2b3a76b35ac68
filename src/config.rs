use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::MIN_ELIGIBLE_JOBS;
use crate::registry::{ReferenceRegistry, RegistryError};

/// Engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_min_eligible_jobs")]
    pub min_eligible_jobs: Option<usize>,
    #[serde(default)]
    pub job_limit: Option<usize>,
    #[serde(default)]
    pub reference_path: Option<String>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            min_eligible_jobs: default_min_eligible_jobs(),
            job_limit: None,
            reference_path: None,
        }
    }
}

fn default_min_eligible_jobs() -> Option<usize> { Some(MIN_ELIGIBLE_JOBS) }

impl MatchingSettings {
    /// Load the configured reference data, or the bundled data when no path is set
    pub fn load_registry(&self) -> Result<ReferenceRegistry, RegistryError> {
        match &self.reference_path {
            Some(path) => ReferenceRegistry::load_from(path),
            None => ReferenceRegistry::builtin(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "full".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ORIENTATION__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ORIENTATION__MATCHING__JOB_LIMIT -> matching.job_limit
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("ORIENTATION")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
