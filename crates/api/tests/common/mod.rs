#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use garun_api::app::build_app;
use garun_api::config::ServerConfig;
use garun_api::state::AppState;
use garun_core::regulation::RegulationTable;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        regulations_path: None,
    }
}

/// Build the full application router over a fresh store and the built-in
/// regulation table.
pub fn build_test_app() -> Router {
    let state = AppState {
        pool: garun_db::create_pool(),
        config: Arc::new(test_config()),
        regulations: Arc::new(RegulationTable::indore_2025()),
    };
    build_app(state).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A survey form with a tall residential building and a narrow gravel road.
pub fn survey_form() -> Value {
    json!({
        "ward_no": "12",
        "survey_date": "2025-02-14",
        "drone_id": "DRN-04",
        "coordinates": {"lat": 22.7196, "lng": 75.8577},
        "incharge_id": "INC-9",
        "zone_type": "residential",
        "buildings": [
            {
                "building_id": "B1",
                "type": "residential",
                "height_meters": 20,
                "floors": 4,
                "area_sq_meters": 120,
                "setbacks": {"front_setback_meters": 3.5}
            }
        ],
        "roads": [
            {"road_id": "R1", "surface_type": "gravel", "width_meters": 5, "length_meters": 80}
        ],
        "land_usage": {
            "residential_area_sq_meters": 800,
            "commercial_area_sq_meters": 100,
            "industrial_area_sq_meters": 0,
            "green_area_sq_meters": 150
        }
    })
}
