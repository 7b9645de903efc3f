// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Account Store
//!
//! In-memory account table. Emails are unique, compared case-insensitively.
//! Passwords are kept as bcrypt hashes, never in clear.

use ledgerdesk_access::identity::{Identity, PermissionTag, Role};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, error, info};
use uuid::Uuid;

/// bcrypt work factor used unless overridden.
pub const DEFAULT_HASH_COST: u32 = bcrypt::DEFAULT_COST;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("An account with email {0} already exists")]
    EmailTaken(String),

    #[error("Invalid account: {0}")]
    Invalid(String),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Failed to read accounts file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse accounts file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

// =============================================================================
// Types
// =============================================================================

/// Request to create an account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub permissions: BTreeSet<PermissionTag>,
}

impl NewAccount {
    fn validate(&self) -> Result<(), AccountError> {
        if self.name.trim().is_empty() {
            return Err(AccountError::Invalid("name is required".to_string()));
        }
        if !self.email.contains('@') {
            return Err(AccountError::Invalid("email is not valid".to_string()));
        }
        if self.password.is_empty() {
            return Err(AccountError::Invalid("password is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password_hash: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// =============================================================================
// Account Store
// =============================================================================

/// Thread-safe account table keyed by account id.
///
/// bcrypt runs on the blocking pool, outside the table lock.
#[derive(Debug)]
pub struct AccountStore {
    accounts: RwLock<HashMap<String, Account>>,
    hash_cost: u32,
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::with_hash_cost(DEFAULT_HASH_COST)
    }
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store hashing with the given bcrypt cost (4..=31).
    pub fn with_hash_cost(hash_cost: u32) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            hash_cost,
        }
    }

    /// Create an account and return its identity.
    pub async fn create(&self, new: NewAccount) -> Result<Identity, AccountError> {
        new.validate()?;
        let email = normalize_email(&new.email);

        if self.exists_email(&email).await {
            return Err(AccountError::EmailTaken(email));
        }

        let cost = self.hash_cost;
        let password = new.password;
        let password_hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;

        let mut accounts = self.accounts.write().await;
        // Re-check: another create may have won while we were hashing.
        if accounts.values().any(|a| a.identity.email == email) {
            return Err(AccountError::EmailTaken(email));
        }

        let id = Uuid::new_v4().to_string();
        let identity = Identity::new(&id, new.name.trim(), email, new.role)
            .with_permissions(new.permissions);

        accounts.insert(
            id,
            Account {
                identity: identity.clone(),
                password_hash,
            },
        );

        info!(
            user_id = %identity.id,
            role = %identity.role,
            permissions = identity.permissions.len(),
            "Account created"
        );
        Ok(identity)
    }

    /// Identity for matching credentials, `None` otherwise.
    pub async fn authenticate(&self, email: &str, password: &str) -> Option<Identity> {
        let email = normalize_email(email);
        let account = self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.identity.email == email)
            .cloned()?;

        let password = password.to_string();
        let hash = account.password_hash.clone();
        let verified = match tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
        {
            Ok(Ok(verified)) => verified,
            Ok(Err(e)) => {
                error!(
                    user_id = %account.identity.id,
                    error = %e,
                    "Stored password hash unreadable"
                );
                false
            }
            Err(e) => {
                error!(error = %e, "Password verification task failed");
                false
            }
        };

        if verified {
            Some(account.identity)
        } else {
            debug!(user_id = %account.identity.id, "Password mismatch");
            None
        }
    }

    pub async fn get(&self, id: &str) -> Option<Identity> {
        self.accounts
            .read()
            .await
            .get(id)
            .map(|a| a.identity.clone())
    }

    pub async fn exists_email(&self, email: &str) -> bool {
        let email = normalize_email(email);
        self.accounts
            .read()
            .await
            .values()
            .any(|a| a.identity.email == email)
    }

    /// All identities, sorted by email.
    pub async fn list(&self) -> Vec<Identity> {
        let mut identities: Vec<_> = self
            .accounts
            .read()
            .await
            .values()
            .map(|a| a.identity.clone())
            .collect();
        identities.sort_by(|a, b| a.email.cmp(&b.email));
        identities
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}

// =============================================================================
// Tests
// =============================================================================
