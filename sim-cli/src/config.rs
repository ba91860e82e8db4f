//! TOML configuration for the `power-sim` binary.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! console = true
//! file = "power-sim.log"
//!
//! [estimate]
//! discount_rate = "0.10"
//! ```
//!
//! Every key is optional. Missing sections take their defaults.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use sim_core::engine::estimate::DEFAULT_DISCOUNT_RATE;
use sim_core::engine::{EstimateError, SavingsCalculator};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Estimate(#[from] EstimateError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub logging: LoggingConfig,
    pub estimate: EstimateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    /// Writes log lines to stderr.
    pub console: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: true,
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EstimateConfig {
    pub discount_rate: Decimal,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            discount_rate: DEFAULT_DISCOUNT_RATE,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(
        input: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.calculator()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn calculator(&self) -> Result<SavingsCalculator, ConfigError> {
        Ok(SavingsCalculator::new(self.estimate.discount_rate)?)
    }
}
