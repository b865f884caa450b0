//! Encoder + forest composed into a single fitted yield model

use crate::dataset::TrainingTable;
use crate::error::{PipelineError, PipelineResult};
use crate::feature_extractor::FeatureEncoder;
use crate::models::forest::{ForestParams, RegressionForest};
use crate::types::record::YieldFeatures;
use tracing::{debug, info};

/// Fitted inference pipeline: feature encoding followed by forest regression.
///
/// Built once at startup and shared read-only; prediction never mutates it.
#[derive(Debug, Clone)]
pub struct YieldPipeline {
    encoder: FeatureEncoder,
    forest: RegressionForest,
}

impl YieldPipeline {
    /// Fit the encoder and forest end-to-end on the training table.
    pub fn fit(table: &TrainingTable, params: &ForestParams) -> PipelineResult<Self> {
        if table.is_empty() {
            return Err(PipelineError::EmptyTrainingSet);
        }

        let (rows, targets) = table.split();
        let encoder = FeatureEncoder::fit(rows.iter().copied());
        let matrix = encoder.transform_batch(rows.iter().copied());

        info!(
            records = table.len(),
            features = encoder.feature_count(),
            feature_names = ?encoder.feature_names(),
            "Training yield pipeline"
        );

        let forest = RegressionForest::fit(&matrix, &targets, params)?;

        Ok(Self { encoder, forest })
    }

    /// Predict total production for one record.
    pub fn predict(&self, features: &YieldFeatures) -> PipelineResult<f64> {
        let row = self.encoder.transform(features);
        let prediction = self.forest.predict(&row)?;

        debug!(
            district = %features.district,
            prediction = prediction,
            "Yield inference complete"
        );

        Ok(prediction)
    }

    /// Run inference on a batch of records
    pub fn predict_batch<'a, I>(&self, rows: I) -> PipelineResult<Vec<f64>>
    where
        I: IntoIterator<Item = &'a YieldFeatures>,
    {
        rows.into_iter().map(|r| self.predict(r)).collect()
    }

    /// Coefficient of determination (R²) of the predictions against `table`.
    ///
    /// A constant target column yields 1.0 for a perfect fit and 0.0 otherwise.
    pub fn score(&self, table: &TrainingTable) -> PipelineResult<f64> {
        if table.is_empty() {
            return Err(PipelineError::EmptyTrainingSet);
        }

        let (rows, targets) = table.split();
        let predictions = self.predict_batch(rows)?;

        let mean = targets.iter().sum::<f64>() / targets.len() as f64;
        let ss_res: f64 = targets
            .iter()
            .zip(&predictions)
            .map(|(y, p)| (y - p).powi(2))
            .sum();
        let ss_tot: f64 = targets.iter().map(|y| (y - mean).powi(2)).sum();

        if ss_tot == 0.0 {
            return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
        }
        Ok(1.0 - ss_res / ss_tot)
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn forest(&self) -> &RegressionForest {
        &self.forest
    }
}
