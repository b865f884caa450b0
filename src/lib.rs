//! Yield Prediction Service Library
//!
//! Predicts paddy production from regional irrigation-scheme statistics
//! using a bagged regression forest fitted at startup on a built-in table.

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod feature_extractor;
pub mod models;
pub mod types;

pub use api::{router, AppState};
pub use config::AppConfig;
pub use dataset::TrainingTable;
pub use error::{ApiError, PipelineError, ValidationError};
pub use feature_extractor::FeatureEncoder;
pub use models::pipeline::YieldPipeline;
pub use types::{record::YieldFeatures, prediction::YieldPrediction};
