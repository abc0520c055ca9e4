//! Response DTOs for presenting estimates.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::PricingError;

use super::calculators::round_money;
use super::comparable::ComparableEstimate;
use super::rules::{NightlyRate, StayQuote};

pub const DEFAULT_CURRENCY: &str = "INR";

/// Money value for JSON responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    /// Rounded and padded to 2 places for display
    pub fn rounded(amount: Decimal, currency: &str) -> Self {
        let mut amount = round_money(amount, 2);
        amount.rescale(2);
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// Response for a comparable estimate
#[derive(Debug, Serialize)]
pub struct ComparableEstimateResponse {
    pub price: MoneyResponse,
    pub base_price: MoneyResponse,
    #[serde(with = "rust_decimal::serde::str")]
    pub season_multiplier: Decimal,
    pub predicted_price: MoneyResponse,
    pub median_actual_price: Option<MoneyResponse>,
    pub match_count: usize,
    pub used_fallback: bool,
    pub reconciled: bool,
}

impl ComparableEstimateResponse {
    pub fn from_estimate(estimate: &ComparableEstimate, currency: &str) -> Self {
        Self {
            price: MoneyResponse::rounded(estimate.price, currency),
            base_price: MoneyResponse::rounded(estimate.base_price, currency),
            season_multiplier: estimate.season_multiplier,
            predicted_price: MoneyResponse::rounded(estimate.predicted_price, currency),
            median_actual_price: estimate
                .median_actual_price
                .map(|amount| MoneyResponse::rounded(amount, currency)),
            match_count: estimate.match_count,
            used_fallback: estimate.used_fallback,
            reconciled: estimate.reconciled,
        }
    }
}

/// One night in a stay quote response
#[derive(Debug, Serialize)]
pub struct NightlyRateResponse {
    pub date: NaiveDate,
    pub weekday: Weekday,
    #[serde(with = "rust_decimal::serde::str")]
    pub season_multiplier: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub weekend_multiplier: Decimal,
    pub price: MoneyResponse,
}

impl NightlyRateResponse {
    fn from_rate(rate: &NightlyRate, currency: &str) -> Self {
        Self {
            date: rate.date,
            weekday: rate.weekday,
            season_multiplier: rate.season_multiplier,
            weekend_multiplier: rate.weekend_multiplier,
            price: MoneyResponse::rounded(rate.price, currency),
        }
    }
}

/// Response for a rule-based stay quote
#[derive(Debug, Serialize)]
pub struct StayQuoteResponse {
    pub nights: Vec<NightlyRateResponse>,
    pub num_nights: i64,
    pub subtotal: MoneyResponse,
    pub platform_fee: MoneyResponse,
    pub total: MoneyResponse,
}

impl StayQuoteResponse {
    pub fn from_quote(quote: &StayQuote, currency: &str) -> Self {
        Self {
            nights: quote
                .nights
                .iter()
                .map(|rate| NightlyRateResponse::from_rate(rate, currency))
                .collect(),
            num_nights: quote.num_nights,
            subtotal: MoneyResponse::rounded(quote.subtotal, currency),
            platform_fee: MoneyResponse::rounded(quote.platform_fee, currency),
            total: MoneyResponse::rounded(quote.total, currency),
        }
    }
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
}

impl From<&PricingError> for PricingErrorResponse {
    fn from(err: &PricingError) -> Self {
        Self {
            error_type: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}
