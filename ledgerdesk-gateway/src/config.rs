// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration loaded from environment variables.
///
/// All configuration is externalized to support 12-factor app deployment.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host (default: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "json" or "pretty" (default: json)
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// HS256 signing secret for login tokens. Required, no default.
    pub jwt_secret: String,

    /// Issuer written into and required from tokens (default: ledgerdesk)
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,

    /// YAML file of seed accounts
    #[serde(default)]
    pub accounts_file: Option<PathBuf>,

    /// Administrator created at startup if no account has this email
    #[serde(default)]
    pub bootstrap_admin_email: Option<String>,

    #[serde(default)]
    pub bootstrap_admin_password: Option<String>,

    /// bcrypt cost for new passwords (default: 12)
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_password_hash_cost() -> u32 {
    crate::accounts::DEFAULT_HASH_COST
}

fn default_jwt_issuer() -> String {
    "ledgerdesk".to_string()
}

// Mirrors bcrypt's accepted cost range (the crate keeps these constants private).
pub(crate) const BCRYPT_MIN_COST: u32 = 4;
pub(crate) const BCRYPT_MAX_COST: u32 = 31;

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are uppercase with underscore separators.
    /// Example: `JWT_SECRET`, `ACCOUNTS_FILE`, etc.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Self>()?.validated()
    }

    fn validated(self) -> Result<Self, envy::Error> {
        if self.jwt_secret.trim().is_empty() {
            return Err(envy::Error::Custom("JWT_SECRET must not be empty".to_string()));
        }
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&self.password_hash_cost) {
            return Err(envy::Error::Custom(format!(
                "PASSWORD_HASH_COST must be between {} and {}",
                BCRYPT_MIN_COST,
                BCRYPT_MAX_COST
            )));
        }
        Ok(self)
    }

    /// Bootstrap administrator credentials, when both are set.
    pub fn bootstrap_admin(&self) -> Option<(&str, &str)> {
        match (&self.bootstrap_admin_email, &self.bootstrap_admin_password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email, password))
            }
            _ => None,
        }
    }
}
