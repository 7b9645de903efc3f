// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
mod auth;
mod error;
mod extract;
mod health;
mod ledger;
mod metrics;
mod modules;
mod users;

pub use auth::{login, me, INVALID_CREDENTIALS};
pub use error::ApiError;
pub use extract::ApiJson;
pub use health::{health_live, health_ready};
pub use ledger::{create_entry, delete_entry, list_entries, update_entry, EntryRequest};
pub use metrics::metrics_handler;
pub use modules::list_modules;
pub use users::{create_user, list_users};
