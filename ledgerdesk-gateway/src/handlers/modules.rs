// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
use axum::Json;
use ledgerdesk_access::navigation::visible_modules;
use ledgerdesk_access::registry::{ModuleDescriptor, ModuleRegistry};

use crate::auth::AuthUser;

/// Navigation entries for the signed-in identity.
///
/// # Endpoint
/// `GET /api/modules`
pub async fn list_modules(AuthUser(user): AuthUser) -> Json<Vec<ModuleDescriptor>> {
    let registry = ModuleRegistry::builtin();
    let modules = visible_modules(Some(&user.identity), &registry)
        .into_iter()
        .copied()
        .collect();
    Json(modules)
}
