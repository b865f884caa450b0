//! Built-in sample training table.

use crate::types::record::{Record, YieldFeatures};

/// Immutable table of regional records the pipeline is fitted on.
#[derive(Debug, Clone)]
pub struct TrainingTable {
    records: Vec<Record>,
}

impl TrainingTable {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// The four-district sample table the service trains on at startup.
    pub fn sample() -> Self {
        Self::new(vec![
            Record::new(
                YieldFeatures::new("Anuradhapura", 3500.0, 2100.0, 8500.0, 14100.0, 13000.0),
                120000.0,
            ),
            Record::new(
                YieldFeatures::new("Polonnaruwa", 3000.0, 1800.0, 9000.0, 13800.0, 12700.0),
                113000.0,
            ),
            Record::new(
                YieldFeatures::new("Kurunegala", 2800.0, 1600.0, 7600.0, 12000.0, 11000.0),
                101000.0,
            ),
            Record::new(
                YieldFeatures::new("Ampara", 2200.0, 1500.0, 8000.0, 11700.0, 10500.0),
                98000.0,
            ),
        ])
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Split into feature rows and the target column.
    pub fn split(&self) -> (Vec<&YieldFeatures>, Vec<f64>) {
        self.records
            .iter()
            .map(|r| (&r.features, r.total_production))
            .unzip()
    }
}
