// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Ledger entry endpoints.
//!
//! The same handlers serve every general module. The module is not taken
//! from the path: each module's router carries its own descriptor as an
//! `Extension`, and the guard for that descriptor has already run.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use ledgerdesk_access::registry::ModuleDescriptor;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::ApiError;
use super::extract::ApiJson;
use crate::auth::AuthUser;
use crate::ledger::LedgerEntry;
use crate::AppState;

pub type ModuleExt = Extension<&'static ModuleDescriptor>;

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub fields: Map<String, Value>,
}

/// `GET /api/ledgers/{slug}/entries`
pub async fn list_entries(
    Extension(module): ModuleExt,
    State(state): State<AppState>,
) -> Json<Vec<LedgerEntry>> {
    Json(state.ledgers.list(module.slug()).await)
}

/// `POST /api/ledgers/{slug}/entries`
pub async fn create_entry(
    Extension(module): ModuleExt,
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<EntryRequest>,
) -> (StatusCode, Json<LedgerEntry>) {
    let entry = state
        .ledgers
        .create(module.slug(), request.fields, user.user_id())
        .await;
    debug!(module = module.slug(), entry_id = %entry.id, "Entry created");
    (StatusCode::CREATED, Json(entry))
}

/// `PUT /api/ledgers/{slug}/entries/{id}`
pub async fn update_entry(
    Extension(module): ModuleExt,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<EntryRequest>,
) -> Result<Json<LedgerEntry>, ApiError> {
    let entry = state
        .ledgers
        .update(module.slug(), &id, request.fields)
        .await?;
    Ok(Json(entry))
}

/// `DELETE /api/ledgers/{slug}/entries/{id}`
pub async fn delete_entry(
    Extension(module): ModuleExt,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.ledgers.delete(module.slug(), &id).await?;
    debug!(module = module.slug(), entry_id = %id, "Entry deleted");
    Ok(StatusCode::NO_CONTENT)
}
