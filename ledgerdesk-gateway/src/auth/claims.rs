// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Token Claims
//!
//! Claims carried by tokens issued at login:
//! - sub: account id
//! - iss: issuer name
//! - iat: issued at (Unix timestamp)
//!
//! There is no `exp`; tokens stay valid until the signing secret changes.
//! Role and permissions are never read from the token, only from the account.

use ledgerdesk_access::identity::Identity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,

    /// Token issuer
    pub iss: String,

    /// Token issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Claims for an identity, issued now.
    pub fn for_identity(identity: &Identity, issuer: &str) -> Self {
        Self {
            sub: identity.id.clone(),
            iss: issuer.to_string(),
            iat: chrono::Utc::now().timestamp(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerdesk_access::identity::Role;

    #[test]
    fn test_claims_for_identity() {
        let identity = Identity::new("u-7", "Ama", "ama@bursary.example", Role::Clerk);
        let claims = Claims::for_identity(&identity, "ledgerdesk");

        assert_eq!(claims.user_id(), "u-7");
        assert_eq!(claims.iss, "ledgerdesk");
        assert!(claims.iat > 0);
    }

    #[test]
    fn test_claims_wire_form() {
        let claims = Claims {
            sub: "u-1".to_string(),
            iss: "ledgerdesk".to_string(),
            iat: 1_700_000_000,
        };
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["sub"], "u-1");
        assert!(json.get("exp").is_none());
        assert!(json.get("role").is_none());
        assert!(json.get("email").is_none());
    }
}
