//! Label encoding for categorical booking attributes.

use std::collections::BTreeMap;

use crate::error::{PricingError, Result};

/// Stable label <-> integer code mapping for one categorical attribute.
///
/// Codes are assigned to the distinct labels in lexicographic order, so the
/// same set of labels always produces the same codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEncoding {
    attribute: String,
    codes: BTreeMap<String, u32>,
    labels: Vec<String>,
}

impl CategoryEncoding {
    /// Fit an encoding from every label observed for `attribute`.
    pub fn fit<I, S>(attribute: &str, observed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut codes: BTreeMap<String, u32> = observed
            .into_iter()
            .map(|label| (label.as_ref().to_string(), 0))
            .collect();

        let mut labels = Vec::with_capacity(codes.len());
        for (code, (label, slot)) in codes.iter_mut().enumerate() {
            *slot = code as u32;
            labels.push(label.clone());
        }

        Self {
            attribute: attribute.to_string(),
            codes,
            labels,
        }
    }

    /// Code for `label`; labels never seen during fitting are rejected.
    pub fn encode(&self, label: &str) -> Result<u32> {
        self.codes.get(label).copied().ok_or_else(|| {
            tracing::warn!("Unknown {} label '{}'", self.attribute, label);
            PricingError::UnknownCategory {
                attribute: self.attribute.clone(),
                label: label.to_string(),
            }
        })
    }

    pub fn decode(&self, code: u32) -> Option<&str> {
        self.labels.get(code as usize).map(String::as_str)
    }

    /// Known labels in code order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
