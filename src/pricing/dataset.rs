//! Immutable comparable-pricing context built once from the booking dataset.
//!
//! The context owns the single-night rows, already encoded against the
//! `houseboat_type` and `season` encodings fitted from those same rows.
//! Nothing in it changes after construction, so it can be shared freely
//! (clone it or wrap it in an `Arc`) between callers.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rust_decimal::Decimal;
use tracing::info;

use crate::error::Result;

use super::encoding::CategoryEncoding;
use super::models::BookingRecord;

/// A single-night booking with its categorical fields encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBooking {
    pub capacity: u32,
    pub bedrooms: u32,
    pub houseboat_type: u32,
    pub season: u32,
    pub base_price: Decimal,
    pub final_price: Decimal,
}

#[derive(Debug, Clone)]
pub struct PricingContext {
    bookings: Vec<EncodedBooking>,
    houseboat_types: CategoryEncoding,
    seasons: CategoryEncoding,
}

impl PricingContext {
    /// Filter to single-night rows, fit the encodings and encode every row.
    pub fn from_records(records: impl IntoIterator<Item = BookingRecord>) -> Result<Self> {
        let mut total = 0usize;
        let eligible: Vec<BookingRecord> = records
            .into_iter()
            .inspect(|_| total += 1)
            .filter(BookingRecord::is_single_night)
            .collect();

        let houseboat_types =
            CategoryEncoding::fit("houseboat_type", eligible.iter().map(|r| &r.houseboat_type));
        let seasons = CategoryEncoding::fit("season", eligible.iter().map(|r| &r.season));

        let bookings = eligible
            .into_iter()
            .map(|r| -> Result<EncodedBooking> {
                Ok(EncodedBooking {
                    houseboat_type: houseboat_types.encode(&r.houseboat_type)?,
                    season: seasons.encode(&r.season)?,
                    capacity: r.capacity,
                    bedrooms: r.bedrooms,
                    base_price: r.base_price,
                    final_price: r.final_price,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Pricing context built: {} of {} bookings eligible, {} houseboat types, {} seasons",
            bookings.len(),
            total,
            houseboat_types.len(),
            seasons.len()
        );

        Ok(Self {
            bookings,
            houseboat_types,
            seasons,
        })
    }

    /// Eligible single-night bookings
    pub fn bookings(&self) -> &[EncodedBooking] {
        &self.bookings
    }

    pub fn houseboat_types(&self) -> &CategoryEncoding {
        &self.houseboat_types
    }

    pub fn seasons(&self) -> &CategoryEncoding {
        &self.seasons
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

/// Read booking records from a JSON array.
pub fn load_records<R: Read>(reader: R) -> Result<Vec<BookingRecord>> {
    let records: Vec<BookingRecord> = serde_json::from_reader(reader)?;
    Ok(records)
}

/// Read booking records from a JSON file on disk.
pub fn load_records_from_path(path: impl AsRef<Path>) -> Result<Vec<BookingRecord>> {
    let path = path.as_ref();
    info!("Loading booking dataset from {}", path.display());
    let file = File::open(path)?;
    load_records(BufReader::new(file))
}
