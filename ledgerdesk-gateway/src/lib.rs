// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! LedgerDesk Gateway
//!
//! HTTP server enforcing LedgerDesk roles and permissions:
//!
//! - `POST /api/auth/login` issues a bearer token
//! - every `/api/*` route behind it requires that token
//! - admin and ledger routes are additionally wrapped by the
//!   authorization guard for their module

pub mod accounts;
pub mod auth;
pub mod config;
pub mod handlers;
pub mod ledger;
pub mod metrics;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Extension, Router,
};
use ledgerdesk_access::guard::Requirement;
use ledgerdesk_access::registry::{ModuleDescriptor, GENERAL_MODULES};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use accounts::AccountStore;
use auth::{auth_middleware, protect, AuthState, TokenIssuer};
use ledger::LedgerStore;
use metrics::Metrics;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountStore>,
    pub ledgers: Arc<LedgerStore>,
    pub tokens: Arc<TokenIssuer>,
    pub metrics: Metrics,
    /// Set once shutdown begins; readiness answers 503 from then on
    pub shutting_down: Arc<AtomicBool>,
}

impl AppState {
    /// `hash_cost` is the bcrypt cost for new passwords.
    pub fn new(tokens: TokenIssuer, hash_cost: u32) -> Self {
        Self {
            accounts: Arc::new(AccountStore::with_hash_cost(hash_cost)),
            ledgers: Arc::new(LedgerStore::new()),
            tokens: Arc::new(tokens),
            metrics: Metrics::new(),
            shutting_down: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState::new(self.tokens.clone(), self.accounts.clone())
    }
}

impl FromRef<AppState> for Metrics {
    fn from_ref(state: &AppState) -> Self {
        state.metrics.clone()
    }
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let authenticated = Router::new()
        .route("/api/auth/me", get(handlers::me))
        .route("/api/modules", get(handlers::list_modules));

    let users = protect(
        Router::new().route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        ),
        Requirement::AdminOnly,
        state.metrics.clone(),
    );

    let protected = GENERAL_MODULES
        .iter()
        .fold(authenticated.merge(users), |router, module| {
            router.merge(ledger_routes(module, &state.metrics))
        })
        .route_layer(middleware::from_fn_with_state(
            state.auth_state(),
            auth_middleware,
        ));

    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .route("/health/live", get(handlers::health_live))
        .route("/health/ready", get(handlers::health_ready))
        .route("/metrics", get(handlers::metrics_handler))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Entry routes for one module, guarded by the module's own requirement.
fn ledger_routes(module: &'static ModuleDescriptor, metrics: &Metrics) -> Router<AppState> {
    let base = format!("/api/ledgers/{}/entries", module.slug());
    let router = Router::new()
        .route(
            &base,
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route(
            &format!("{}/:id", base),
            put(handlers::update_entry).delete(handlers::delete_entry),
        );

    protect(router, module.requirement, metrics.clone()).layer(Extension(module))
}
