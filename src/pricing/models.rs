//! Input models for the pricing estimators.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

/// Platform fee applied when the caller does not supply one
pub const DEFAULT_PLATFORM_FEE_PERCENT: Decimal = dec!(10.0);

/// Historical booking row from the source dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub capacity: u32,
    pub bedrooms: u32,
    pub houseboat_type: String,
    pub season: String,
    /// Nights booked. Datasets without the column carry `None`.
    #[serde(default)]
    pub duration: Option<u32>,
    pub base_price: Decimal,
    pub final_price: Decimal,
}

impl BookingRecord {
    /// Only single-night bookings take part in comparable lookups
    pub fn is_single_night(&self) -> bool {
        self.duration.map_or(true, |nights| nights == 1)
    }
}

/// Query for the comparable estimator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuery {
    pub capacity: u32,
    pub bedrooms: u32,
    pub houseboat_type: String,
    pub season: String,
}

impl PriceQuery {
    pub fn new(
        capacity: u32,
        bedrooms: u32,
        houseboat_type: impl Into<String>,
        season: impl Into<String>,
    ) -> Self {
        Self {
            capacity,
            bedrooms,
            houseboat_type: houseboat_type.into(),
            season: season.into(),
        }
    }
}

/// Stay to be priced by the rule-based estimator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayRequest {
    pub base_price_per_night: Decimal,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub platform_fee_percent: Decimal,
}

impl StayRequest {
    pub fn new(base_price_per_night: Decimal, check_in_date: NaiveDate, check_out_date: NaiveDate) -> Self {
        Self {
            base_price_per_night,
            check_in_date,
            check_out_date,
            platform_fee_percent: DEFAULT_PLATFORM_FEE_PERCENT,
        }
    }

    pub fn with_platform_fee(mut self, platform_fee_percent: Decimal) -> Self {
        self.platform_fee_percent = platform_fee_percent;
        self
    }

    /// Build a request from `YYYY-MM-DD` date strings.
    pub fn parse(base_price_per_night: Decimal, check_in: &str, check_out: &str) -> Result<Self> {
        let check_in_date = parse_date("check_in_date", check_in)?;
        let check_out_date = parse_date("check_out_date", check_out)?;
        Ok(Self::new(base_price_per_night, check_in_date, check_out_date))
    }

    /// Whole days between check-in and check-out (negative when reversed)
    pub fn num_nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        tracing::warn!("Missing {}", field);
        return Err(PricingError::invalid_input(field, "missing"));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        tracing::warn!("Invalid {} '{}': {}", field, value, e);
        PricingError::invalid_input(field, format!("'{}' is not a YYYY-MM-DD date", value))
    })
}
