//! Prediction response payload

use serde::{Deserialize, Serialize};

/// Response body of `POST /predict-yield`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldPrediction {
    /// Predicted total production, rounded to two decimal places
    pub predicted_yield: f64,
}

impl YieldPrediction {
    /// Wrap a raw model output, rounding it to two decimal places.
    pub fn from_raw(raw: f64) -> Self {
        Self {
            predicted_yield: round_to_cents(raw),
        }
    }
}

/// Half-to-even at the second decimal place.
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
