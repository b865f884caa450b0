//! Yield model components

pub mod forest;
pub mod pipeline;

pub use forest::{ForestParams, RegressionForest};
pub use pipeline::YieldPipeline;
