use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use yield_prediction_service::models::forest::ForestParams;
use yield_prediction_service::{router, AppState, TrainingTable, YieldPipeline};

fn app_with_seed(seed: Option<u64>) -> Router {
    let params = ForestParams {
        seed,
        ..ForestParams::default()
    };
    let pipeline = YieldPipeline::fit(&TrainingTable::sample(), &params).unwrap();
    router(AppState::new(Arc::new(pipeline)))
}

async fn post(app: &Router, body: &Value) -> (StatusCode, Value) {
    let request = Request::post("/predict-yield")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn features_json(district: &str, numbers: [f64; 5]) -> Value {
    json!({
        "District": district,
        "Major_Schemes_Sown": numbers[0],
        "Minor_Schemes_Sown": numbers[1],
        "Rainfed_Sown": numbers[2],
        "All_Schemes_Sown": numbers[3],
        "Nett_Extent_Harvested": numbers[4],
    })
}

fn has_at_most_two_decimals(value: f64) -> bool {
    let scaled = value * 100.0;
    (scaled - scaled.round()).abs() < 1e-6
}

#[tokio::test]
async fn training_rows_return_finite_non_negative_predictions() {
    let app = app_with_seed(None);

    for record in TrainingTable::sample().records() {
        let body = serde_json::to_value(&record.features).unwrap();
        let (status, response) = post(&app, &body).await;

        assert_eq!(status, StatusCode::OK);
        let value = response["predicted_yield"].as_f64().unwrap();
        assert!(value.is_finite());
        assert!(value >= 0.0);
        assert!(has_at_most_two_decimals(value));
    }
}

#[tokio::test]
async fn unseen_district_still_predicts() {
    let app = app_with_seed(Some(5));
    let body = features_json("Colombo", [3000.0, 2000.0, 8000.0, 13000.0, 12000.0]);

    let (status, response) = post(&app, &body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(response["predicted_yield"].as_f64().unwrap().is_finite());
}

#[tokio::test]
async fn identical_requests_identical_responses() {
    let app = app_with_seed(None);
    let body = features_json("Kurunegala", [2800.0, 1600.0, 7600.0, 12000.0, 11000.0]);

    let (first_status, first) = post(&app, &body).await;
    let (second_status, second) = post(&app, &body).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert!(first["predicted_yield"].as_f64().is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn missing_numeric_field_fails() {
    let app = app_with_seed(Some(5));
    let mut body = features_json("Ampara", [2200.0, 1500.0, 8000.0, 11700.0, 10500.0]);
    body.as_object_mut().unwrap().remove("Rainfed_Sown");

    let (status, _) = post(&app, &body).await;

    assert_ne!(status, StatusCode::OK);
}

#[tokio::test]
async fn target_column_in_request_fails() {
    let app = app_with_seed(Some(5));
    let mut body = features_json("Ampara", [2200.0, 1500.0, 8000.0, 11700.0, 10500.0]);
    body["Total_Production"] = json!(98000);

    let (status, response) = post(&app, &body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "unexpected field: Total_Production");
}

#[tokio::test]
async fn anuradhapura_example_near_training_target() {
    let app = app_with_seed(None);
    let body = features_json("Anuradhapura", [3500.0, 2100.0, 8500.0, 14100.0, 13000.0]);

    let (status, response) = post(&app, &body).await;

    assert_eq!(status, StatusCode::OK);
    let value = response["predicted_yield"].as_f64().unwrap();
    assert!((97_999.0..=120_001.0).contains(&value));
}

#[tokio::test]
async fn key_order_does_not_matter() {
    let app = app_with_seed(Some(9));
    let ordered = features_json("Polonnaruwa", [3000.0, 1800.0, 9000.0, 13800.0, 12700.0]);
    let shuffled: Value = serde_json::from_str(
        r#"{"Nett_Extent_Harvested": 12700, "Rainfed_Sown": 9000, "District": "Polonnaruwa",
            "All_Schemes_Sown": 13800, "Minor_Schemes_Sown": 1800, "Major_Schemes_Sown": 3000}"#,
    )
    .unwrap();

    let (_, a) = post(&app, &ordered).await;
    let (_, b) = post(&app, &shuffled).await;

    assert_eq!(a, b);
}
