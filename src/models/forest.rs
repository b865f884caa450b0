//! Bootstrap-aggregated regression forest backed by aprender

use crate::error::{PipelineError, PipelineResult};
use aprender::primitives::{Matrix, Vector};
use aprender::tree::RandomForestRegressor;
use tracing::info;

/// Ensemble configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestParams {
    /// Number of trees in the ensemble
    pub n_estimators: usize,
    /// Maximum tree depth; `None` grows until leaves are pure
    pub max_depth: Option<usize>,
    /// Seed for bootstrap sampling; `None` draws fresh randomness
    pub seed: Option<u64>,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            seed: None,
        }
    }
}

impl ForestParams {
    pub fn validate(&self) -> PipelineResult<()> {
        if self.n_estimators == 0 {
            return Err(PipelineError::InvalidParameter {
                name: "n_estimators",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_depth == Some(0) {
            return Err(PipelineError::InvalidParameter {
                name: "max_depth",
                reason: "must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }

    fn regressor(&self) -> RandomForestRegressor {
        let mut model = RandomForestRegressor::new(self.n_estimators);
        if let Some(depth) = self.max_depth {
            model = model.with_max_depth(depth);
        }
        if let Some(seed) = self.seed {
            model = model.with_random_state(seed);
        }
        model
    }
}

/// Fitted forest plus the feature width it was trained on.
#[derive(Debug, Clone)]
pub struct RegressionForest {
    model: RandomForestRegressor,
    n_trees: usize,
    n_features: usize,
}

impl RegressionForest {
    /// Fit the ensemble on an encoded feature matrix.
    pub fn fit(rows: &[Vec<f64>], targets: &[f64], params: &ForestParams) -> PipelineResult<Self> {
        params.validate()?;

        if rows.is_empty() {
            return Err(PipelineError::EmptyTrainingSet);
        }
        if rows.len() != targets.len() {
            return Err(PipelineError::LengthMismatch {
                rows: rows.len(),
                targets: targets.len(),
            });
        }

        let n_features = rows[0].len();
        if let Some(row) = rows.iter().find(|r| r.len() != n_features) {
            return Err(PipelineError::FeatureWidth {
                expected: n_features,
                actual: row.len(),
            });
        }

        let x = to_matrix(rows, n_features)?;
        let y = Vector::from_vec(targets.iter().map(|&t| t as f32).collect());

        let mut model = params.regressor();
        model
            .fit(&x, &y)
            .map_err(|e| PipelineError::Fit(e.to_string()))?;

        info!(
            n_estimators = params.n_estimators,
            n_samples = rows.len(),
            n_features = n_features,
            seeded = params.seed.is_some(),
            "Regression forest fitted"
        );

        Ok(Self {
            model,
            n_trees: params.n_estimators,
            n_features,
        })
    }

    /// Mean of the tree predictions for one encoded row.
    pub fn predict(&self, row: &[f64]) -> PipelineResult<f64> {
        if row.len() != self.n_features {
            return Err(PipelineError::FeatureWidth {
                expected: self.n_features,
                actual: row.len(),
            });
        }

        let x = Matrix::from_vec(1, self.n_features, row.iter().map(|&v| v as f32).collect())
            .map_err(|e| PipelineError::Fit(e.to_string()))?;
        let predictions = self.model.predict(&x);
        predictions
            .as_slice()
            .first()
            .map(|&p| f64::from(p))
            .ok_or_else(|| PipelineError::Fit("forest returned no prediction".to_string()))
    }

    /// Mean decrease in impurity per encoded feature, summing to 1.
    pub fn feature_importances(&self) -> Option<Vec<f64>> {
        self.model
            .feature_importances()
            .map(|v| v.into_iter().map(f64::from).collect())
    }

    pub fn n_trees(&self) -> usize {
        self.n_trees
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

fn to_matrix(rows: &[Vec<f64>], n_features: usize) -> PipelineResult<Matrix<f32>> {
    let data: Vec<f32> = rows.iter().flatten().map(|&v| v as f32).collect();
    Matrix::from_vec(rows.len(), n_features, data).map_err(|e| PipelineError::Fit(e.to_string()))
}
