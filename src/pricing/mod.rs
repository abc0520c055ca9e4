//! Pricing engine module for houseboat bookings.
//!
//! Two independent estimators: `comparable` prices from historical bookings,
//! `rules` prices from calendar multipliers. Both are pure functions over
//! their inputs.

pub mod calculators;
pub mod comparable;
pub mod dataset;
pub mod encoding;
pub mod models;
pub mod responses;
pub mod rules;

// Re-export commonly used items
pub use calculators::round_money;
pub use comparable::ComparableEstimate;
pub use dataset::PricingContext;
pub use encoding::CategoryEncoding;
pub use models::{BookingRecord, PriceQuery, StayRequest};
pub use rules::{NightlyRate, StayQuote};
