//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no dataset access.
//! Both estimators build their prices out of these pieces.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Season label that earns the peak markup in the comparable estimator
pub const PEAK_SEASON_LABEL: &str = "Peak";

pub const PEAK_MULTIPLIER: Decimal = dec!(1.20);
pub const OFF_PEAK_MULTIPLIER: Decimal = dec!(0.85);
pub const NEUTRAL_MULTIPLIER: Decimal = dec!(1.0);
pub const WEEKEND_MULTIPLIER: Decimal = dec!(1.15);

/// Relative deviation from the actual median above which a prediction is reconciled
pub const RECONCILIATION_THRESHOLD: Decimal = dec!(0.20);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use houseboat_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Median of a set of amounts; the mean of the two middle values for even sizes.
///
/// Returns `None` for an empty slice.
pub fn median(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(midpoint(sorted[mid - 1], sorted[mid]))
    } else {
        Some(sorted[mid])
    }
}

/// Arithmetic mean of two amounts, without overflowing near `Decimal::MAX`.
pub fn midpoint(a: Decimal, b: Decimal) -> Decimal {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    match hi.checked_sub(lo) {
        Some(spread) => lo + spread / dec!(2),
        None => lo / dec!(2) + hi / dec!(2),
    }
}

/// Season multiplier for the comparable estimator, keyed on the season label.
pub fn label_season_multiplier(season: &str) -> Decimal {
    if season == PEAK_SEASON_LABEL {
        PEAK_MULTIPLIER
    } else {
        OFF_PEAK_MULTIPLIER
    }
}

/// Calendar season multiplier for the night starting on `date`.
///
/// Dec-Feb is peak, Jun-Aug is the monsoon discount, everything else is neutral.
pub fn calendar_season_multiplier(date: NaiveDate) -> Decimal {
    match date.month() {
        12 | 1 | 2 => PEAK_MULTIPLIER,
        6 | 7 | 8 => OFF_PEAK_MULTIPLIER,
        _ => NEUTRAL_MULTIPLIER,
    }
}

/// Weekend markup for the night beginning on `date` (Friday and Saturday nights).
pub fn weekend_multiplier(date: NaiveDate) -> Decimal {
    match date.weekday() {
        Weekday::Fri | Weekday::Sat => WEEKEND_MULTIPLIER,
        _ => NEUTRAL_MULTIPLIER,
    }
}

/// Fee owed on `subtotal` at `fee_percent` percent (unrounded).
///
/// `None` when the product overflows.
pub fn platform_fee(subtotal: Decimal, fee_percent: Decimal) -> Option<Decimal> {
    subtotal.checked_mul(fee_percent).map(|amount| amount / dec!(100))
}

/// Pull `predicted` toward `actual` when it deviates by more than the threshold.
///
/// Returns the (possibly adjusted) price and whether the adjustment happened.
pub fn reconcile(predicted: Decimal, actual: Decimal) -> (Decimal, bool) {
    // A gap too wide to represent is past any threshold
    let exceeds = match predicted.checked_sub(actual) {
        Some(deviation) => deviation.abs() > RECONCILIATION_THRESHOLD * actual,
        None => true,
    };
    if exceeds {
        (midpoint(predicted, actual), true)
    } else {
        (predicted, false)
    }
}
