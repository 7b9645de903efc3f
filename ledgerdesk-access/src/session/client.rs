// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Authentication client
//!
//! Exchanges credentials for a token and an identity at the authentication
//! endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::error::{SessionError, FALLBACK_MESSAGE, INVALID_CREDENTIALS_MESSAGE};
use crate::identity::Identity;

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Successful authentication response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
}

/// Error payload returned by the server on failure.
#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

// =============================================================================
// Authenticator
// =============================================================================

/// Anything that can turn credentials into a token and identity.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse, SessionError>;
}

/// Configuration for [`HttpAuthenticator`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the gateway, without trailing slash
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Authenticator talking to the gateway over HTTP.
pub struct HttpAuthenticator {
    client: Client,
    config: ClientConfig,
}

impl HttpAuthenticator {
    pub fn new(config: ClientConfig) -> Result<Self, SessionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    fn login_url(&self) -> String {
        format!("{}/api/auth/login", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<LoginResponse, SessionError> {
        let url = self.login_url();
        debug!(url = %url, email = %credentials.email, "Sending login request");

        let response = self.client.post(&url).json(credentials).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        Err(classify_failure(status, body.message))
    }
}

/// Map a non-success status and optional server message to a session error.
fn classify_failure(status: StatusCode, message: Option<String>) -> SessionError {
    let message = message.filter(|m| !m.trim().is_empty());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST => SessionError::Authentication {
            message: message.unwrap_or_else(|| INVALID_CREDENTIALS_MESSAGE.to_string()),
        },
        _ => SessionError::Server {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_login_url_trims_slash() {
        let auth = HttpAuthenticator::new(ClientConfig {
            base_url: "http://ledger.local/".to_string(),
            timeout_seconds: 5,
        })
        .unwrap();
        assert_eq!(auth.login_url(), "http://ledger.local/api/auth/login");
    }

    #[test]
    fn test_classify_unauthorized_with_and_without_message() {
        let err = classify_failure(StatusCode::UNAUTHORIZED, None);
        assert_eq!(err.user_message(), INVALID_CREDENTIALS_MESSAGE);

        let err = classify_failure(StatusCode::UNAUTHORIZED, Some("Account locked".to_string()));
        assert!(err.is_authentication_failure());
        assert_eq!(err.user_message(), "Account locked");
    }

    #[test]
    fn test_classify_server_error() {
        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, Some("  ".to_string()));
        match err {
            SessionError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, FALLBACK_MESSAGE);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Bind then drop to get a local port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let auth = HttpAuthenticator::new(ClientConfig {
            base_url: format!("http://127.0.0.1:{}", port),
            timeout_seconds: 2,
        })
        .unwrap();

        let err = auth
            .authenticate(&Credentials::new("ama@bursary.example", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Transport(_)), "got {:?}", err);
        assert!(!err.is_authentication_failure());
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_login_response_wire_format() {
        let json = r#"{
            "token": "eyJ.x.y",
            "user": {
                "id": "42",
                "name": "Ama",
                "role": "CLERK",
                "permissions": ["LOAN_LEDGER_MANAGEMENT"],
                "email": "ama@bursary.example"
            }
        }"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token, "eyJ.x.y");
        assert_eq!(response.user.permissions.len(), 1);
    }
}
