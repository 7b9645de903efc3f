// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::atomic::Ordering;

use crate::AppState;

/// Health check response body.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    accounts: Option<usize>,
}

/// Liveness probe endpoint.
///
/// Returns 200 OK if the process is alive.
///
/// # Endpoint
/// `GET /health/live`
pub async fn health_live() -> Response {
    let response = HealthResponse {
        status: "ok",
        accounts: None,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Readiness probe endpoint.
///
/// Returns 503 once shutdown has begun, so load balancers stop routing
/// before the listener closes.
///
/// # Endpoint
/// `GET /health/ready`
pub async fn health_ready(State(state): State<AppState>) -> Response {
    if state.shutting_down.load(Ordering::SeqCst) {
        let response = HealthResponse {
            status: "shutting_down",
            accounts: None,
        };
        return (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response();
    }

    let response = HealthResponse {
        status: "ok",
        accounts: Some(state.accounts.len().await),
    };
    (StatusCode::OK, Json(response)).into_response()
}
