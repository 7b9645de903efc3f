// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Login and current-identity endpoints.

use axum::{extract::State, Json};
use ledgerdesk_access::identity::Identity;
use ledgerdesk_access::session::{Credentials, LoginResponse};
use tracing::{error, info, warn};

use super::error::ApiError;
use super::extract::ApiJson;
use crate::auth::AuthUser;
use crate::AppState;

/// Message for any credential mismatch. Does not reveal which part was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> Result<Json<LoginResponse>, ApiError> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        state.metrics.record_login("invalid_credentials");
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let Some(identity) = state
        .accounts
        .authenticate(&credentials.email, &credentials.password)
        .await
    else {
        warn!(email = %credentials.email, "Login rejected");
        state.metrics.record_login("invalid_credentials");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    let token = state.tokens.issue(&identity).map_err(|e| {
        error!(error = %e, user_id = %identity.id, "Failed to issue token");
        state.metrics.record_login("error");
        ApiError::internal()
    })?;

    info!(user_id = %identity.id, role = %identity.role, "Login succeeded");
    state.metrics.record_login("success");
    Ok(Json(LoginResponse {
        token,
        user: identity,
    }))
}

/// `GET /api/auth/me`
pub async fn me(AuthUser(user): AuthUser) -> Json<Identity> {
    Json(user.identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get, post, send_raw, test_state, CLERK_EMAIL, PASSWORD};
    use axum::http::Method;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_success() {
        let (state, _) = test_state().await;
        let (status, body) = post(
            &state,
            "/api/auth/login",
            None,
            json!({"email": CLERK_EMAIL, "password": PASSWORD}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], CLERK_EMAIL);
        assert_eq!(body["user"]["role"], "CLERK");
        let token = body["token"].as_str().unwrap();
        assert_eq!(state.tokens.verify(token).unwrap().sub, body["user"]["id"]);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (state, _) = test_state().await;
        let (status, body) = post(
            &state,
            "/api/auth/login",
            None,
            json!({"email": CLERK_EMAIL, "password": "nope"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], INVALID_CREDENTIALS);
        assert!(state
            .metrics
            .encode()
            .contains("ledgerdesk_login_total{result=\"invalid_credentials\"} 1"));
    }

    #[tokio::test]
    async fn test_login_unknown_email_same_message() {
        let (state, _) = test_state().await;
        let (status, body) = post(
            &state,
            "/api/auth/login",
            None,
            json!({"email": "who@bursary.example", "password": PASSWORD}),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_login_empty_fields() {
        let (state, _) = test_state().await;
        let (status, _) = post(
            &state,
            "/api/auth/login",
            None,
            json!({"email": "", "password": ""}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_malformed_body_is_json_400() {
        let (state, _) = test_state().await;

        for body in [r#"{"email": "a@b.c", "password""#, r#"{"email": 7}"#] {
            let (status, json) = send_raw(
                &state,
                Method::POST,
                "/api/auth/login",
                None,
                Some(body.to_string()),
            )
            .await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"], "bad_request");
            assert!(!json["message"].as_str().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let (state, tokens) = test_state().await;

        let (status, _) = get(&state, "/api/auth/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = get(&state, "/api/auth/me", Some(&tokens.clerk)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], CLERK_EMAIL);
        assert_eq!(body["permissions"], json!(["LOAN_LEDGER_MANAGEMENT"]));
    }
}
