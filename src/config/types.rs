//! Configuration types for call pricing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Threshold of the reference tariff, in minutes.
pub const DEFAULT_THRESHOLD_MINUTES: u64 = 20;

/// Per-minute rate of the reference tariff up to the threshold (0.05).
pub const DEFAULT_BASE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Per-minute rate of the reference tariff beyond the threshold (0.10).
pub const DEFAULT_OVERFLOW_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Metadata about the tariff.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TariffMetadata {
    /// Short identifying code (e.g., "STD").
    pub code: String,
    /// The human-readable name of the tariff.
    pub name: String,
    /// The version or effective date of the tariff.
    pub version: String,
}

impl Default for TariffMetadata {
    fn default() -> Self {
        Self {
            code: "STD".to_string(),
            name: "Standard call tariff".to_string(),
            version: "1".to_string(),
        }
    }
}

/// The two-tier per-minute rate table.
///
/// Deserialized from `pricing.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PricingTiers {
    /// Minutes billed at the base rate before the overflow rate applies.
    pub threshold_minutes: u64,
    /// Rate per minute up to and including the threshold.
    pub base_rate_per_minute: Decimal,
    /// Rate per minute beyond the threshold.
    pub overflow_rate_per_minute: Decimal,
}

impl PricingTiers {
    /// The price of exactly `threshold_minutes` minutes.
    pub fn threshold_amount(&self) -> Decimal {
        Decimal::from(self.threshold_minutes) * self.base_rate_per_minute
    }
}

impl Default for PricingTiers {
    fn default() -> Self {
        Self {
            threshold_minutes: DEFAULT_THRESHOLD_MINUTES,
            base_rate_per_minute: DEFAULT_BASE_RATE,
            overflow_rate_per_minute: DEFAULT_OVERFLOW_RATE,
        }
    }
}

/// The complete tariff configuration.
///
/// `TariffConfig::default()` is the reference tariff; [`ConfigLoader`](super::ConfigLoader)
/// reads the same structure from YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TariffConfig {
    /// Tariff metadata.
    metadata: TariffMetadata,
    /// Rate table.
    pricing: PricingTiers,
}

impl TariffConfig {
    /// Creates a new TariffConfig from its component parts.
    pub fn new(metadata: TariffMetadata, pricing: PricingTiers) -> Self {
        Self { metadata, pricing }
    }

    /// Returns the tariff metadata.
    pub fn tariff(&self) -> &TariffMetadata {
        &self.metadata
    }

    /// Returns the rate table.
    pub fn pricing(&self) -> &PricingTiers {
        &self.pricing
    }
}
