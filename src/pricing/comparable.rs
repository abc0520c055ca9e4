//! Comparable-based estimator.
//!
//! Prices a query from the median of historically identical single-night
//! bookings, then sanity-checks the prediction against what those bookings
//! actually sold for.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{PricingError, Result};

use super::calculators::{label_season_multiplier, median, reconcile, round_money};
use super::dataset::PricingContext;
use super::models::PriceQuery;

/// Result of a comparable estimate, with its breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct ComparableEstimate {
    /// Final price rounded to 2 places
    pub price: Decimal,
    /// Median base price of the matches (or of the whole dataset on fallback)
    pub base_price: Decimal,
    pub season_multiplier: Decimal,
    /// `base_price * season_multiplier`, before reconciliation
    pub predicted_price: Decimal,
    /// Median realized price of the matches; `None` on fallback
    pub median_actual_price: Option<Decimal>,
    pub match_count: usize,
    pub used_fallback: bool,
    pub reconciled: bool,
}

/// Estimate the nightly price for `query` from comparable bookings.
///
/// Matching is exact on capacity, bedrooms, houseboat type and season. With
/// no match the global median base price is used and reconciliation is skipped.
///
/// A query capacity of 0 is rejected with `InvalidInput`: booking capacity is
/// at least 1, so such a query could only ever hit the fallback.
pub fn estimate(context: &PricingContext, query: &PriceQuery) -> Result<ComparableEstimate> {
    if context.is_empty() {
        warn!("Comparable estimate requested against an empty dataset");
        return Err(PricingError::EmptyDataset);
    }
    if query.capacity == 0 {
        warn!("Rejected comparable query with zero capacity");
        return Err(PricingError::invalid_input("capacity", "must be at least 1"));
    }

    let houseboat_type = context.houseboat_types().encode(&query.houseboat_type)?;
    let season = context.seasons().encode(&query.season)?;

    let matches: Vec<_> = context
        .bookings()
        .iter()
        .filter(|b| {
            b.capacity == query.capacity
                && b.bedrooms == query.bedrooms
                && b.houseboat_type == houseboat_type
                && b.season == season
        })
        .collect();

    debug!(
        "Comparable query {:?} matched {} of {} bookings",
        query,
        matches.len(),
        context.len()
    );

    let base_prices: Vec<Decimal> = matches.iter().map(|b| b.base_price).collect();
    let (base_price, used_fallback) = match median(&base_prices) {
        Some(price) => (price, false),
        None => {
            let all: Vec<Decimal> = context.bookings().iter().map(|b| b.base_price).collect();
            let price = median(&all).ok_or(PricingError::EmptyDataset)?;
            debug!("No comparable bookings, falling back to global median {}", price);
            (price, true)
        }
    };

    let season_multiplier = label_season_multiplier(&query.season);
    let predicted_price = base_price
        .checked_mul(season_multiplier)
        .ok_or_else(|| PricingError::out_of_range("predicted_price"))?;

    let actual_prices: Vec<Decimal> = matches.iter().map(|b| b.final_price).collect();
    let median_actual_price = median(&actual_prices);

    let (adjusted, reconciled) = match median_actual_price {
        Some(actual) => reconcile(predicted_price, actual),
        None => (predicted_price, false),
    };

    if reconciled {
        debug!(
            "Prediction {} deviates >20% from actual median {:?}, reconciled to {}",
            predicted_price, median_actual_price, adjusted
        );
    }

    Ok(ComparableEstimate {
        price: round_money(adjusted, 2),
        base_price,
        season_multiplier,
        predicted_price,
        median_actual_price,
        match_count: matches.len(),
        used_fallback,
        reconciled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::BookingRecord;
    use rust_decimal_macros::dec;

    fn booking(
        capacity: u32,
        bedrooms: u32,
        houseboat_type: &str,
        season: &str,
        duration: u32,
        base_price: Decimal,
        final_price: Decimal,
    ) -> BookingRecord {
        BookingRecord {
            capacity,
            bedrooms,
            houseboat_type: houseboat_type.to_string(),
            season: season.to_string(),
            duration: Some(duration),
            base_price,
            final_price,
        }
    }

    fn fixture() -> PricingContext {
        PricingContext::from_records(vec![
            // Standard / Peak / 4 guests / 2 bedrooms
            booking(4, 2, "Standard", "Peak", 1, dec!(7000), dec!(8400)),
            booking(4, 2, "Standard", "Peak", 1, dec!(8000), dec!(9600)),
            // Luxury / Off-Season / 6 guests / 3 bedrooms, sold well under prediction
            booking(6, 3, "Luxury", "Off-Season", 1, dec!(12000), dec!(6000)),
            // Standard / Off-Season
            booking(2, 1, "Standard", "Off-Season", 1, dec!(5000), dec!(4250)),
            // Multi-night rows never participate
            booking(4, 2, "Standard", "Peak", 3, dec!(100000), dec!(100000)),
        ])
        .unwrap()
    }

    #[test]
    fn test_exact_match_without_reconciliation() {
        let ctx = fixture();
        let est = estimate(&ctx, &PriceQuery::new(4, 2, "Standard", "Peak")).unwrap();

        // median(7000, 8000) = 7500; * 1.20 = 9000; actual median 9000 -> no adjustment
        assert_eq!(est.match_count, 2);
        assert_eq!(est.base_price, dec!(7500));
        assert_eq!(est.predicted_price, dec!(9000));
        assert_eq!(est.median_actual_price, Some(dec!(9000)));
        assert!(!est.used_fallback);
        assert!(!est.reconciled);
        assert_eq!(est.price, dec!(9000.00));
    }

    #[test]
    fn test_exact_match_with_reconciliation() {
        let ctx = fixture();
        let est = estimate(&ctx, &PriceQuery::new(6, 3, "Luxury", "Off-Season")).unwrap();

        // 12000 * 0.85 = 10200 vs actual 6000: deviation 4200 > 1200
        assert_eq!(est.predicted_price, dec!(10200));
        assert!(est.reconciled);
        assert_eq!(est.price, dec!(8100.00));
    }

    #[test]
    fn test_fallback_to_global_median() {
        let ctx = fixture();
        let est = estimate(&ctx, &PriceQuery::new(10, 5, "Luxury", "Peak")).unwrap();

        // Global median of eligible rows: 5000, 7000, 8000, 12000 -> 7500
        assert!(est.used_fallback);
        assert_eq!(est.match_count, 0);
        assert_eq!(est.base_price, dec!(7500));
        assert_eq!(est.median_actual_price, None);
        assert!(!est.reconciled);
        assert_eq!(est.price, dec!(9000.00));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let ctx = fixture();
        let err = estimate(&ctx, &PriceQuery::new(4, 2, "Houseboat", "Peak")).unwrap_err();
        assert_eq!(err.kind(), "unknown_category");

        let err = estimate(&ctx, &PriceQuery::new(4, 2, "Standard", "Monsoon")).unwrap_err();
        assert_eq!(
            err,
            PricingError::UnknownCategory {
                attribute: "season".to_string(),
                label: "Monsoon".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_dataset() {
        let ctx = PricingContext::from_records(vec![booking(
            4,
            2,
            "Standard",
            "Peak",
            2,
            dec!(7000),
            dec!(8400),
        )])
        .unwrap();
        let err = estimate(&ctx, &PriceQuery::new(4, 2, "Standard", "Peak")).unwrap_err();
        assert_eq!(err, PricingError::EmptyDataset);
    }

    #[test]
    fn test_median_of_maximal_prices_does_not_overflow() {
        let ctx = PricingContext::from_records(vec![
            booking(4, 2, "Standard", "Off-Season", 1, Decimal::MAX, Decimal::MAX),
            booking(4, 2, "Standard", "Off-Season", 1, Decimal::MAX, Decimal::MAX),
            booking(4, 2, "Standard", "Peak", 1, Decimal::MAX, Decimal::MAX),
        ])
        .unwrap();

        let est = estimate(&ctx, &PriceQuery::new(4, 2, "Standard", "Off-Season")).unwrap();
        assert_eq!(est.base_price, Decimal::MAX);
        assert_eq!(est.median_actual_price, Some(Decimal::MAX));
        assert!(!est.reconciled);
    }

    #[test]
    fn test_peak_markup_past_max_is_out_of_range() {
        let ctx = PricingContext::from_records(vec![
            booking(4, 2, "Standard", "Peak", 1, Decimal::MAX, Decimal::MAX),
            booking(4, 2, "Standard", "Peak", 1, Decimal::MAX, Decimal::MAX),
        ])
        .unwrap();

        let err = estimate(&ctx, &PriceQuery::new(4, 2, "Standard", "Peak")).unwrap_err();
        assert_eq!(err, PricingError::invalid_input("predicted_price", "amount out of range"));
    }

    #[test]
    fn test_zero_capacity_is_invalid() {
        let ctx = fixture();
        let err = estimate(&ctx, &PriceQuery::new(0, 2, "Standard", "Peak")).unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
    }

    #[test]
    fn test_full_precision_until_rounding() {
        let ctx = PricingContext::from_records(vec![booking(
            2,
            1,
            "Standard",
            "Off-Season",
            1,
            dec!(3333.33),
            dec!(2833.33),
        )])
        .unwrap();
        let est = estimate(&ctx, &PriceQuery::new(2, 1, "Standard", "Off-Season")).unwrap();

        // 3333.33 * 0.85 = 2833.3305, inside the threshold
        assert_eq!(est.predicted_price, dec!(2833.3305));
        assert_eq!(est.price, dec!(2833.33));
    }
}
