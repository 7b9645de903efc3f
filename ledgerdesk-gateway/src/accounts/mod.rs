// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Accounts
//!
//! Account table backing the login endpoint and user administration.
//!
//! - **store**: bcrypt password hashes, unique emails
//! - **seed**: YAML seed file and bootstrap administrator

pub mod seed;
pub mod store;

pub use seed::SeedFile;
pub use store::{AccountError, AccountStore, NewAccount, DEFAULT_HASH_COST};
