// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Account seeding from a YAML file and the bootstrap administrator.

use ledgerdesk_access::identity::Role;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

use super::store::{AccountError, AccountStore, NewAccount};

/// Top-level shape of the accounts file.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub accounts: Vec<NewAccount>,
}

impl SeedFile {
    pub fn parse(yaml: &str) -> Result<Self, AccountError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

impl AccountStore {
    /// Load accounts from a YAML seed file.
    ///
    /// Entries whose email is already taken are skipped, so reloading the
    /// same file is harmless. Returns the number of accounts created.
    pub async fn load_seed(&self, path: impl AsRef<Path>) -> Result<usize, AccountError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let seed = SeedFile::parse(&content)?;

        let mut created = 0;
        for account in seed.accounts {
            match self.create(account).await {
                Ok(_) => created += 1,
                Err(AccountError::EmailTaken(email)) => {
                    info!(email = %email, "Seed account already present, skipping");
                }
                Err(e) => return Err(e),
            }
        }

        info!(path = %path.display(), created, "Accounts seeded");
        Ok(created)
    }

    /// Ensure an administrator exists with the given email.
    ///
    /// Returns `true` when a new account was created.
    pub async fn bootstrap_admin(&self, email: &str, password: &str) -> Result<bool, AccountError> {
        if self.exists_email(email).await {
            return Ok(false);
        }

        let admin = NewAccount {
            name: "Administrator".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: Role::Administrator,
            permissions: BTreeSet::new(),
        };
        self.create(admin).await?;
        warn!(email = %email, "Bootstrap administrator created, change its password");
        Ok(true)
    }
}
