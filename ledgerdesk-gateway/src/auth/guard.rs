// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Request-level Authorization Guard
//!
//! Wraps routes with a `Requirement` check that runs before the handler.
//! The decision itself comes from `ledgerdesk_access::guard`; this layer
//! only turns it into a response and counts it.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};
use ledgerdesk_access::guard::{evaluate, Decision, Requirement};
use tracing::{debug, warn};

use super::middleware::{AuthError, AuthenticatedUser};
use crate::metrics::Metrics;

/// State for one `require_access` layer.
#[derive(Clone)]
pub struct GuardState {
    pub requirement: Requirement,
    pub metrics: Metrics,
}

/// Authorization middleware.
///
/// Must run inside `auth_middleware`. A request without an authenticated
/// user is 401, a denied one is 403.
pub async fn require_access(
    State(guard): State<GuardState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AuthError::unauthorized("No authenticated user"))?;

    match evaluate(Some(&user.identity), guard.requirement) {
        Decision::Granted => {
            debug!(
                user_id = %user.user_id(),
                requirement = %guard.requirement,
                "Access granted"
            );
            guard.metrics.record_access_decision(true);
            Ok(next.run(request).await)
        }
        Decision::Denied(reason) => {
            warn!(
                user_id = %user.user_id(),
                requirement = %guard.requirement,
                reason = %reason,
                path = %request.uri().path(),
                "Access denied"
            );
            guard.metrics.record_access_decision(false);
            Err(AuthError::forbidden("Access denied").with_details(reason.to_string()))
        }
    }
}

/// Guard every route of `router` with `requirement`.
pub fn protect<S>(router: Router<S>, requirement: Requirement, metrics: Metrics) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(
        GuardState {
            requirement,
            metrics,
        },
        require_access,
    ))
}

// =============================================================================
// Tests
// =============================================================================
