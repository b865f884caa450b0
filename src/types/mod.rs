//! Type definitions for the yield prediction service

pub mod prediction;
pub mod record;

pub use prediction::YieldPrediction;
pub use record::{Record, YieldFeatures};
