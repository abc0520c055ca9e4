//! Rule-based estimator.
//!
//! Each night is priced independently from the calendar: a season multiplier
//! and a weekend multiplier apply on top of the nightly base price. The nightly
//! prices are summed and the platform fee is added on the subtotal.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{PricingError, Result};

use super::calculators::{calendar_season_multiplier, platform_fee, round_money, weekend_multiplier};
use super::models::StayRequest;

/// Price of one night of a stay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NightlyRate {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub season_multiplier: Decimal,
    pub weekend_multiplier: Decimal,
    pub price: Decimal,
}

/// Result of a rule-based estimate
#[derive(Debug, Clone, PartialEq)]
pub struct StayQuote {
    pub nights: Vec<NightlyRate>,
    pub num_nights: i64,
    /// Sum of nightly prices (unrounded)
    pub subtotal: Decimal,
    /// Fee on the subtotal (unrounded)
    pub platform_fee: Decimal,
    /// `subtotal + platform_fee`, rounded to 2 places
    pub total: Decimal,
}

/// Validate a stay request without pricing it.
pub fn validate(request: &StayRequest) -> Result<()> {
    if request.base_price_per_night <= Decimal::ZERO {
        warn!("Rejected non-positive base price {}", request.base_price_per_night);
        return Err(PricingError::invalid_input(
            "base_price_per_night",
            "must be positive",
        ));
    }
    if request.platform_fee_percent < Decimal::ZERO {
        warn!("Rejected negative platform fee {}", request.platform_fee_percent);
        return Err(PricingError::invalid_input(
            "platform_fee_percent",
            "must not be negative",
        ));
    }
    if request.check_out_date <= request.check_in_date {
        warn!(
            "Rejected stay: check-out {} is not after check-in {}",
            request.check_out_date, request.check_in_date
        );
        return Err(PricingError::InvalidRange {
            check_in: request.check_in_date,
            check_out: request.check_out_date,
        });
    }
    Ok(())
}

/// Price a stay night by night.
pub fn estimate(request: &StayRequest) -> Result<StayQuote> {
    validate(request)?;

    let nights: Vec<NightlyRate> = request
        .check_in_date
        .iter_days()
        .take_while(|date| *date < request.check_out_date)
        .map(|date| price_night(request.base_price_per_night, date))
        .collect::<Result<_>>()?;

    let subtotal = nights
        .iter()
        .try_fold(Decimal::ZERO, |acc, n| acc.checked_add(n.price))
        .ok_or_else(|| PricingError::out_of_range("subtotal"))?;
    let fee = platform_fee(subtotal, request.platform_fee_percent)
        .ok_or_else(|| PricingError::out_of_range("platform_fee"))?;
    let total = subtotal
        .checked_add(fee)
        .map(|total| round_money(total, 2))
        .ok_or_else(|| PricingError::out_of_range("total"))?;

    debug!(
        "Priced {} nights from {}: subtotal {}, fee {}, total {}",
        nights.len(),
        request.check_in_date,
        subtotal,
        fee,
        total
    );

    Ok(StayQuote {
        num_nights: request.num_nights(),
        nights,
        subtotal,
        platform_fee: fee,
        total,
    })
}

fn price_night(base_price: Decimal, date: NaiveDate) -> Result<NightlyRate> {
    let season_multiplier = calendar_season_multiplier(date);
    let weekend_multiplier = weekend_multiplier(date);
    let price = base_price
        .checked_mul(season_multiplier)
        .and_then(|price| price.checked_mul(weekend_multiplier))
        .ok_or_else(|| PricingError::out_of_range("nightly_price"))?;

    Ok(NightlyRate {
        date,
        weekday: date.weekday(),
        season_multiplier,
        weekend_multiplier,
        price,
    })
}
