//! Tiered per-minute pricing.
//!
//! ## Rate Structure
//!
//! **Billed minutes are priced in two tiers:**
//! - Up to the threshold (20 minutes): 0.05 per minute
//! - Beyond the threshold: a flat 1.00 for the first 20 minutes plus 0.10 per extra minute
//!
//! The flat part is derived from the first tier, so the price is continuous
//! at the threshold for any configured tiers.

use rust_decimal::Decimal;

use crate::config::PricingTiers;

/// Prices `minutes` with the reference tariff.
///
/// # Example
///
/// ```
/// use call_charge::calculation::cost;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(cost(10), Decimal::from_str("0.50").unwrap());
/// assert_eq!(cost(20), Decimal::from_str("1.00").unwrap());
/// assert_eq!(cost(25), Decimal::from_str("1.50").unwrap());
/// ```
pub fn cost(minutes: u64) -> Decimal {
    cost_with_tiers(minutes, &PricingTiers::default())
}

/// Prices `minutes` with the given tiers.
///
/// - `minutes <= threshold`: `minutes × base rate`
/// - `minutes > threshold`: `threshold × base rate + (minutes − threshold) × overflow rate`
pub fn cost_with_tiers(minutes: u64, tiers: &PricingTiers) -> Decimal {
    if minutes <= tiers.threshold_minutes {
        Decimal::from(minutes) * tiers.base_rate_per_minute
    } else {
        tiers.threshold_amount()
            + Decimal::from(minutes - tiers.threshold_minutes) * tiers.overflow_rate_per_minute
    }
}
