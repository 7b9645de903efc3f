// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Token Issuing and Validation
//!
//! Features:
//! - HS256 signing with a shared secret
//! - Issuer validation
//! - Bearer header extraction

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use ledgerdesk_access::identity::Identity;
use thiserror::Error;
use tracing::debug;

use super::claims::Claims;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Invalid Authorization header format (expected 'Bearer <token>')")]
    InvalidHeaderFormat,

    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token decode error: {0}")]
    Decode(String),

    #[error("Token encode error: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

// =============================================================================
// Token Issuer
// =============================================================================

/// Signs and verifies login tokens.
pub struct TokenIssuer {
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Issue a token for an identity.
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        let claims = Claims::for_identity(identity, &self.issuer);
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Verify a token's signature and issuer, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation.set_issuer(&[&self.issuer]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidIssuer => TokenError::InvalidIssuer {
                    expected: self.issuer.clone(),
                },
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Decode(e.to_string()),
            })?;

        debug!(sub = %token_data.claims.sub, "Token verified");
        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

/// Extract a token from an Authorization header value.
pub fn extract_bearer(auth_header: &str) -> Result<&str, TokenError> {
    let (scheme, token) = auth_header
        .split_once(' ')
        .ok_or(TokenError::InvalidHeaderFormat)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(TokenError::InvalidHeaderFormat);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::InvalidHeaderFormat);
    }
    Ok(token)
}

// =============================================================================
// Tests
// =============================================================================
