//! Runtime configuration loaded from the environment (and `.env`)

use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::error::{PricingError, Result};
use crate::pricing::models::DEFAULT_PLATFORM_FEE_PERCENT;
use crate::pricing::responses::DEFAULT_CURRENCY;

pub const DATASET_VAR: &str = "HOUSEBOAT_DATASET";
pub const PLATFORM_FEE_VAR: &str = "HOUSEBOAT_PLATFORM_FEE_PERCENT";
pub const CURRENCY_VAR: &str = "HOUSEBOAT_CURRENCY";
pub const LOG_VAR: &str = "HOUSEBOAT_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Default booking dataset for the comparable estimator
    pub dataset_path: Option<PathBuf>,
    pub platform_fee_percent: Decimal,
    pub currency: String,
    /// Fallback tracing filter when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: None,
            platform_fee_percent: DEFAULT_PLATFORM_FEE_PERCENT,
            currency: DEFAULT_CURRENCY.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let platform_fee_percent = match var(PLATFORM_FEE_VAR) {
            Some(raw) => parse_fee(&raw)?,
            None => defaults.platform_fee_percent,
        };

        Ok(Self {
            dataset_path: var(DATASET_VAR).map(PathBuf::from),
            platform_fee_percent,
            currency: var(CURRENCY_VAR).unwrap_or(defaults.currency),
            log_filter: var(LOG_VAR).unwrap_or(defaults.log_filter),
        })
    }
}

fn parse_fee(raw: &str) -> Result<Decimal> {
    let fee: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| PricingError::invalid_input(PLATFORM_FEE_VAR, format!("'{}' is not a number", raw)))?;
    if fee < Decimal::ZERO {
        return Err(PricingError::invalid_input(PLATFORM_FEE_VAR, "must not be negative"));
    }
    Ok(fee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.platform_fee_percent, dec!(10.0));
        assert_eq!(s.currency, "INR");
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            (DATASET_VAR, "data/bookings.json"),
            (PLATFORM_FEE_VAR, "12.5"),
            (CURRENCY_VAR, "USD"),
            (LOG_VAR, "debug"),
        ])
        .unwrap();
        assert_eq!(s.dataset_path, Some(PathBuf::from("data/bookings.json")));
        assert_eq!(s.platform_fee_percent, dec!(12.5));
        assert_eq!(s.currency, "USD");
        assert_eq!(s.log_filter, "debug");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let s = settings(&[(PLATFORM_FEE_VAR, "  "), (DATASET_VAR, "")]).unwrap();
        assert_eq!(s.platform_fee_percent, dec!(10.0));
        assert_eq!(s.dataset_path, None);
    }

    #[test]
    fn test_invalid_fee() {
        assert_eq!(settings(&[(PLATFORM_FEE_VAR, "ten")]).unwrap_err().kind(), "invalid_input");
        assert_eq!(settings(&[(PLATFORM_FEE_VAR, "-1")]).unwrap_err().kind(), "invalid_input");
    }
}
