// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! User administration. Mounted behind the admin-only guard.

use axum::{extract::State, http::StatusCode, Json};
use ledgerdesk_access::identity::Identity;
use tracing::info;

use super::error::ApiError;
use super::extract::ApiJson;
use crate::accounts::NewAccount;
use crate::auth::AuthUser;
use crate::AppState;

/// `GET /api/users`
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<Identity>> {
    Json(state.accounts.list().await)
}

/// `POST /api/users`
pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    ApiJson(account): ApiJson<NewAccount>,
) -> Result<(StatusCode, Json<Identity>), ApiError> {
    let identity = state.accounts.create(account).await?;
    info!(
        created_by = %admin.user_id(),
        user_id = %identity.id,
        "User created by administrator"
    );
    Ok((StatusCode::CREATED, Json(identity)))
}
