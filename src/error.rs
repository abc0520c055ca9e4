//! Error handling for the pricing estimators

use chrono::NaiveDate;

/// Pricing failure kinds.
///
/// Every failure is detected before any partial price is computed, so an
/// error never travels alongside an approximate result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Check-out date {check_out} must be after check-in date {check_in}")]
    InvalidRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Unknown {attribute} '{label}'")]
    UnknownCategory { attribute: String, label: String },

    #[error("No eligible single-night bookings in dataset")]
    EmptyDataset,

    #[error("Dataset error: {0}")]
    Dataset(String),
}

impl PricingError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        PricingError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Arithmetic on `field` left the representable `Decimal` range
    pub fn out_of_range(field: &str) -> Self {
        tracing::warn!("Amount out of range while computing {}", field);
        Self::invalid_input(field, "amount out of range")
    }

    /// Stable tag used by error responses
    pub fn kind(&self) -> &'static str {
        match self {
            PricingError::InvalidInput { .. } => "invalid_input",
            PricingError::InvalidRange { .. } => "invalid_range",
            PricingError::UnknownCategory { .. } => "unknown_category",
            PricingError::EmptyDataset => "empty_dataset",
            PricingError::Dataset(_) => "dataset",
        }
    }
}

impl From<std::io::Error> for PricingError {
    fn from(e: std::io::Error) -> Self {
        PricingError::Dataset(e.to_string())
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(e: serde_json::Error) -> Self {
        PricingError::Dataset(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
