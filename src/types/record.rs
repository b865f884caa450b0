//! Regional irrigation and production records

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DISTRICT: &str = "District";
pub const MAJOR_SCHEMES_SOWN: &str = "Major_Schemes_Sown";
pub const MINOR_SCHEMES_SOWN: &str = "Minor_Schemes_Sown";
pub const RAINFED_SOWN: &str = "Rainfed_Sown";
pub const ALL_SCHEMES_SOWN: &str = "All_Schemes_Sown";
pub const NETT_EXTENT_HARVESTED: &str = "Nett_Extent_Harvested";
pub const TOTAL_PRODUCTION: &str = "Total_Production";

/// Numeric feature columns, in the order they are passed through to the model.
pub const NUMERIC_COLUMNS: [&str; 5] = [
    MAJOR_SCHEMES_SOWN,
    MINOR_SCHEMES_SOWN,
    RAINFED_SOWN,
    ALL_SCHEMES_SOWN,
    NETT_EXTENT_HARVESTED,
];

/// Feature fields of a record, the unit of inference input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YieldFeatures {
    /// Administrative district name
    #[serde(rename = "District")]
    pub district: String,

    /// Extent sown under major irrigation schemes
    #[serde(rename = "Major_Schemes_Sown")]
    pub major_schemes_sown: f64,

    /// Extent sown under minor irrigation schemes
    #[serde(rename = "Minor_Schemes_Sown")]
    pub minor_schemes_sown: f64,

    /// Extent sown under rainfed cultivation
    #[serde(rename = "Rainfed_Sown")]
    pub rainfed_sown: f64,

    /// Total extent sown across all schemes
    #[serde(rename = "All_Schemes_Sown")]
    pub all_schemes_sown: f64,

    /// Net extent harvested
    #[serde(rename = "Nett_Extent_Harvested")]
    pub nett_extent_harvested: f64,
}

impl YieldFeatures {
    pub fn new(
        district: impl Into<String>,
        major_schemes_sown: f64,
        minor_schemes_sown: f64,
        rainfed_sown: f64,
        all_schemes_sown: f64,
        nett_extent_harvested: f64,
    ) -> Self {
        Self {
            district: district.into(),
            major_schemes_sown,
            minor_schemes_sown,
            rainfed_sown,
            all_schemes_sown,
            nett_extent_harvested,
        }
    }

    /// Map a dynamic JSON body onto the fixed feature schema.
    ///
    /// Every feature key must be present with the right JSON type and no
    /// other key may appear; `Total_Production` counts as an unexpected key.
    pub fn from_json(body: Value) -> Result<Self, ValidationError> {
        if !body.is_object() {
            return Err(ValidationError::NotAnObject);
        }
        Ok(serde_json::from_value(body)?)
    }

    /// Numeric fields in passthrough order (see [`NUMERIC_COLUMNS`]).
    pub fn numeric_values(&self) -> [f64; 5] {
        [
            self.major_schemes_sown,
            self.minor_schemes_sown,
            self.rainfed_sown,
            self.all_schemes_sown,
            self.nett_extent_harvested,
        ]
    }
}

/// One full row of the training table: features plus the production target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(flatten)]
    pub features: YieldFeatures,

    /// Total paddy production, the training target
    #[serde(rename = "Total_Production")]
    pub total_production: f64,
}

impl Record {
    pub fn new(features: YieldFeatures, total_production: f64) -> Self {
        Self {
            features,
            total_production,
        }
    }
}
