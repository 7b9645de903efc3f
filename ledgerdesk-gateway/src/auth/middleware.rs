// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Auth Middleware
//!
//! Features:
//! - Extract the bearer token from the Authorization header
//! - Verify the token and resolve the current account by `sub`
//! - Inject the authenticated user into request extensions

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use ledgerdesk_access::identity::Identity;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::token::{extract_bearer, TokenError, TokenIssuer};
use crate::accounts::AccountStore;

// =============================================================================
// Auth State
// =============================================================================

/// Authentication state shared by the middleware.
#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenIssuer>,
    pub accounts: Arc<AccountStore>,
}

impl AuthState {
    pub fn new(tokens: Arc<TokenIssuer>, accounts: Arc<AccountStore>) -> Self {
        Self { tokens, accounts }
    }
}

// =============================================================================
// Authenticated User (Request Extension)
// =============================================================================

/// Authenticated user, injected into request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Account as currently stored, not as it was when the token was issued
    pub identity: Identity,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> &str {
        &self.identity.id
    }
}

// =============================================================================
// Auth Error Response
// =============================================================================

/// Authentication error response.
#[derive(Debug, Serialize)]
pub struct AuthError {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AuthError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            error: "unauthorized".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn forbidden(message: &str) -> Self {
        Self {
            error: "forbidden".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = if self.error == "forbidden" {
            StatusCode::FORBIDDEN
        } else {
            StatusCode::UNAUTHORIZED
        };

        (status, Json(self)).into_response()
    }
}

// =============================================================================
// Auth Middleware
// =============================================================================

/// Bearer token authentication middleware.
///
/// On success injects `AuthenticatedUser` into request extensions,
/// otherwise answers 401.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AuthError::unauthorized(&TokenError::MissingHeader.to_string()))?;

    let token = extract_bearer(header).map_err(|e| AuthError::unauthorized(&e.to_string()))?;

    let claims = auth_state.tokens.verify(token).map_err(|e| {
        warn!(error = %e, "Token verification failed");
        match e {
            TokenError::InvalidIssuer { .. } => AuthError::unauthorized("Invalid issuer"),
            TokenError::InvalidSignature => AuthError::unauthorized("Invalid signature"),
            _ => AuthError::unauthorized("Invalid token"),
        }
    })?;

    let identity = auth_state
        .accounts
        .get(claims.user_id())
        .await
        .ok_or_else(|| {
            warn!(user_id = %claims.sub, "Token subject has no account");
            AuthError::unauthorized("Unknown account")
        })?;

    debug!(
        user_id = %identity.id,
        role = %identity.role,
        "User authenticated"
    );

    request
        .extensions_mut()
        .insert(AuthenticatedUser { identity });

    Ok(next.run(request).await)
}

// =============================================================================
// Extractor
// =============================================================================

/// Extractor for the authenticated user.
///
/// ```ignore
/// async fn handler(AuthUser(user): AuthUser) -> impl IntoResponse {
///     format!("Hello, {}", user.identity.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AuthError::unauthorized("No authenticated user"))
    }
}

// =============================================================================
// Tests
// =============================================================================
