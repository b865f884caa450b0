//! Yield Prediction Service - Main Entry Point
//!
//! Fits the yield pipeline on the built-in table, then serves predictions over HTTP.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use yield_prediction_service::{
    api::{self, AppState},
    config::{AppConfig, LoggingConfig},
    dataset::TrainingTable,
    models::pipeline::YieldPipeline,
};

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(
        format!("yield_prediction_service={}", logging.level)
            .parse()
            .context("Invalid logging.level")?,
    );

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;
    init_logging(&config.logging)?;

    info!("Starting Yield Prediction Service");
    info!(
        n_estimators = config.model.n_estimators,
        seed = ?config.model.seed,
        "Configuration loaded successfully"
    );

    // Fit the pipeline before accepting any request
    let start_time = Instant::now();
    let table = TrainingTable::sample();
    let pipeline = YieldPipeline::fit(&table, &config.model.forest_params())
        .context("Failed to fit yield pipeline")?;
    let r2 = pipeline.score(&table)?;
    info!(
        records = table.len(),
        trees = pipeline.forest().n_trees(),
        in_sample_r2 = format!("{:.4}", r2),
        fit_time_ms = start_time.elapsed().as_millis(),
        "Yield pipeline ready"
    );
    if let Some(importances) = pipeline.forest().feature_importances() {
        for (name, importance) in pipeline.encoder().feature_names().iter().zip(importances) {
            debug!(feature = %name, importance = format!("{:.4}", importance), "Feature importance");
        }
    }

    let addr = config.server.socket_addr()?;
    api::serve(addr, AppState::new(Arc::new(pipeline))).await
}
