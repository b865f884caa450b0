//! Feature encoding for yield model training and inference.
//!
//! A record becomes a numeric row made of a one-hot block for `District`
//! followed by the numeric columns, passed through unchanged.

use crate::types::record::{YieldFeatures, DISTRICT, NUMERIC_COLUMNS};
use std::collections::BTreeSet;
use tracing::debug;

/// Where a category lands in the one-hot block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryEncoding {
    /// Category seen during fit, at this indicator position
    Known(usize),
    /// Category never seen during fit; encodes to an all-zero block
    Unseen,
}

/// One-hot encoder over a single categorical column.
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    /// Categories in indicator order (sorted)
    categories: Vec<String>,
}

impl OneHotEncoder {
    /// Fit on the observed values. Indicator positions follow sorted order.
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let categories: BTreeSet<&str> = values.into_iter().collect();
        Self {
            categories: categories.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn width(&self) -> usize {
        self.categories.len()
    }

    pub fn classify(&self, value: &str) -> CategoryEncoding {
        match self
            .categories
            .binary_search_by(|category| category.as_str().cmp(value))
        {
            Ok(position) => CategoryEncoding::Known(position),
            Err(_) => CategoryEncoding::Unseen,
        }
    }

    /// Append the indicator block for `value` to `out`.
    pub fn encode_into(&self, value: &str, out: &mut Vec<f64>) {
        let start = out.len();
        out.resize(start + self.width(), 0.0);

        match self.classify(value) {
            CategoryEncoding::Known(position) => out[start + position] = 1.0,
            CategoryEncoding::Unseen => {
                debug!(category = %value, "Unseen category, encoding as zero vector");
            }
        }
    }
}

/// Column transformer: one-hot `District`, pass the numeric columns through.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    district: OneHotEncoder,
}

impl FeatureEncoder {
    /// Fit the district encoder on the training rows.
    pub fn fit<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a YieldFeatures>,
    {
        Self {
            district: OneHotEncoder::fit(rows.into_iter().map(|r| r.district.as_str())),
        }
    }

    /// Encode one row.
    ///
    /// Layout is `[one-hot district] ++ [Major, Minor, Rainfed, All, Nett]`.
    pub fn transform(&self, row: &YieldFeatures) -> Vec<f64> {
        let mut features = Vec::with_capacity(self.feature_count());
        self.district.encode_into(&row.district, &mut features);
        features.extend_from_slice(&row.numeric_values());
        features
    }

    pub fn transform_batch<'a, I>(&self, rows: I) -> Vec<Vec<f64>>
    where
        I: IntoIterator<Item = &'a YieldFeatures>,
    {
        rows.into_iter().map(|r| self.transform(r)).collect()
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        self.district.width() + NUMERIC_COLUMNS.len()
    }

    /// Encoded column names, in output order.
    pub fn feature_names(&self) -> Vec<String> {
        self.district
            .categories()
            .iter()
            .map(|c| format!("{}_{}", DISTRICT, c))
            .chain(NUMERIC_COLUMNS.iter().map(|c| c.to_string()))
            .collect()
    }

    pub fn district_encoder(&self) -> &OneHotEncoder {
        &self.district
    }
}
