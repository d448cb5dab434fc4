//! Configuration loading and management for the call charge engine.
//!
//! This module provides functionality to load tariff configurations from YAML
//! files: tariff metadata and the two-tier per-minute rate table.
//!
//! # Example
//!
//! ```no_run
//! use call_charge::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Loaded tariff: {}", config.tariff().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_BASE_RATE, DEFAULT_OVERFLOW_RATE, DEFAULT_THRESHOLD_MINUTES, PricingTiers,
    TariffConfig, TariffMetadata,
};
