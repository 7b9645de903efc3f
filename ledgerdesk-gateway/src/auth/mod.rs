// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Authentication and Authorization Module
//!
//! ## Components
//!
//! - **claims**: claims carried by login tokens
//! - **token**: HS256 token issuing and validation
//! - **middleware**: Axum middleware for request authentication
//! - **guard**: request-level authorization against a `Requirement`
//!
//! ## Usage
//!
//! ```ignore
//! use ledgerdesk_gateway::auth::{auth_middleware, protect, AuthState, AuthUser};
//!
//! let auth_state = AuthState::new(tokens, accounts);
//!
//! let users = protect(
//!     Router::new().route("/api/users", get(list_users)),
//!     Requirement::AdminOnly,
//!     metrics,
//! );
//!
//! let app = users.route_layer(middleware::from_fn_with_state(auth_state, auth_middleware));
//!
//! async fn list_users(AuthUser(user): AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}", user.identity.name)
//! }
//! ```

pub mod claims;
pub mod guard;
pub mod middleware;
pub mod token;

// Re-exports for convenience
pub use claims::Claims;
pub use guard::{protect, require_access, GuardState};
pub use middleware::{auth_middleware, AuthError, AuthState, AuthUser, AuthenticatedUser};
pub use token::{extract_bearer, TokenError, TokenIssuer};
