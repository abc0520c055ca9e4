//! Houseboat rental price estimation.
//!
//! - [`pricing::comparable`]: median of identical historical single-night bookings,
//!   reconciled against their realized prices.
//! - [`pricing::rules`]: per-night season and weekend multipliers plus a platform fee.

pub mod config;
pub mod error;
pub mod pricing;

pub use error::{PricingError, Result};
