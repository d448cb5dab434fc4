//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tariff
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{PricingTiers, TariffConfig, TariffMetadata};

/// Loads and provides access to tariff configuration.
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// ├── tariff.yaml   # Tariff metadata
/// └── pricing.yaml  # Two-tier per-minute rates
/// ```
///
/// # Example
///
/// ```no_run
/// use call_charge::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard").unwrap();
/// println!("Loaded tariff: {}", loader.tariff().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TariffConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A rate is negative
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TariffMetadata>(&path.join("tariff.yaml"))?;

        let pricing_path = path.join("pricing.yaml");
        let pricing = Self::load_yaml::<PricingTiers>(&pricing_path)?;
        Self::check_pricing(&pricing, &pricing_path)?;

        debug!(
            code = %metadata.code,
            threshold_minutes = pricing.threshold_minutes,
            "Loaded tariff configuration"
        );

        Ok(Self {
            config: TariffConfig::new(metadata, pricing),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_pricing(pricing: &PricingTiers, path: &Path) -> EngineResult<()> {
        let negative = [
            ("base_rate_per_minute", pricing.base_rate_per_minute),
            ("overflow_rate_per_minute", pricing.overflow_rate_per_minute),
        ]
        .into_iter()
        .find(|(_, rate)| *rate < Decimal::ZERO);

        match negative {
            Some((field, rate)) => Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("{} must not be negative, got {}", field, rate),
            }),
            None => Ok(()),
        }
    }

    /// Returns the underlying tariff configuration.
    pub fn config(&self) -> &TariffConfig {
        &self.config
    }

    /// Consumes the loader, returning the tariff configuration.
    pub fn into_config(self) -> TariffConfig {
        self.config
    }

    /// Returns the tariff metadata.
    pub fn tariff(&self) -> &TariffMetadata {
        self.config.tariff()
    }

    /// Returns the rate table.
    pub fn pricing(&self) -> &PricingTiers {
        self.config.pricing()
    }
}
