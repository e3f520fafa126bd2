//! Common test utilities for integration tests
//!
//! Builds the full router, middleware included, and drives it in-process.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use calorie_calc_backend::{config::AppConfig, routes, state::AppState};
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    /// Create a test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::new(config).expect("valid test configuration");
        let app = routes::create_router(state);
        Self { app }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// POST a JSON value and parse the JSON response
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.post(path, &body.to_string()).await;
        let json = serde_json::from_str(&body)
            .unwrap_or_else(|e| panic!("response is not JSON ({}): {}", e, body));
        (status, json)
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}

/// Male, 80 kg, 180 cm, 30 y, sedentary, mesomorph, maintenance, 2.0 g/kg protein
pub fn reference_request() -> serde_json::Value {
    serde_json::json!({
        "sex": "male",
        "age_years": 30,
        "weight": 80,
        "height": 180,
        "activity_level": "sedentary",
        "body_type": "mesomorph",
        "protein_g_per_kg": 2.0,
        "fat_fraction_of_kcal": 0.25
    })
}
