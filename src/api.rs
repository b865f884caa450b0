//! HTTP surface: `POST /predict-yield`

use crate::error::ApiError;
use crate::models::pipeline::YieldPipeline;
use crate::types::{YieldFeatures, YieldPrediction};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Shared router state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<YieldPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<YieldPipeline>) -> Self {
        Self { pipeline }
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict-yield", post(predict_yield))
        .with_state(state)
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Yield prediction API listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn predict_yield(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<YieldPrediction>, ApiError> {
    let start_time = Instant::now();

    let features = YieldFeatures::from_json(body)?;
    let raw = state.pipeline.predict(&features)?;
    let prediction = YieldPrediction::from_raw(raw);

    debug!(
        district = %features.district,
        predicted_yield = prediction.predicted_yield,
        processing_time_us = start_time.elapsed().as_micros(),
        "Prediction served"
    );

    Ok(Json(prediction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TrainingTable;
    use crate::models::forest::ForestParams;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> Router {
        let params = ForestParams {
            seed: Some(11),
            ..ForestParams::default()
        };
        let pipeline = YieldPipeline::fit(&TrainingTable::sample(), &params).unwrap();
        router(AppState::new(Arc::new(pipeline)))
    }

    fn request(body: impl Into<Body>) -> Request<Body> {
        Request::post("/predict-yield")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn send(app: Router, body: Value) -> (StatusCode, Value) {
        let response = app.oneshot(request(body.to_string())).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn anuradhapura() -> Value {
        json!({
            "District": "Anuradhapura",
            "Major_Schemes_Sown": 3500,
            "Minor_Schemes_Sown": 2100,
            "Rainfed_Sown": 8500,
            "All_Schemes_Sown": 14100,
            "Nett_Extent_Harvested": 13000
        })
    }

    #[tokio::test]
    async fn test_predict_yield() {
        let (status, body) = send(app(), anuradhapura()).await;

        assert_eq!(status, StatusCode::OK);
        let value = body["predicted_yield"].as_f64().unwrap();
        assert!((97_999.0..=120_001.0).contains(&value));
        assert_eq!(body.as_object().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_field_rejected() {
        let mut input = anuradhapura();
        input.as_object_mut().unwrap().remove("Rainfed_Sown");

        let (status, body) = send(app(), input).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "missing required field: Rainfed_Sown");
    }

    #[tokio::test]
    async fn test_mistyped_and_unknown_fields_rejected() {
        let mut input = anuradhapura();
        input["Major_Schemes_Sown"] = json!("3500");
        let (status, body) = send(app(), input).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().starts_with("invalid request body"));

        let mut input = anuradhapura();
        input["Season"] = json!("Yala");
        let (status, body) = send(app(), input).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "unexpected field: Season");
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let response = app().oneshot(request("{not json")).await.unwrap();
        assert!(!response.status().is_success());
    }

    #[tokio::test]
    async fn test_wrong_route() {
        let response = app()
            .oneshot(
                Request::post("/predict")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(anuradhapura().to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
