// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
use thiserror::Error;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum SessionError {
    /// Credentials rejected; the user may simply try again
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Any other non-success response from the server
    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Session storage failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl SessionError {
    /// Message suitable for showing to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Authentication { message } | SessionError::Server { message, .. } => {
                message.clone()
            }
            SessionError::Transport(_) | SessionError::Storage(_) | SessionError::Corrupt(_) => {
                FALLBACK_MESSAGE.to_string()
            }
        }
    }

    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, SessionError::Authentication { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_uses_server_text() {
        let err = SessionError::Authentication {
            message: "Account disabled".to_string(),
        };
        assert_eq!(err.user_message(), "Account disabled");
        assert!(err.is_authentication_failure());

        let err = SessionError::Server {
            status: 502,
            message: "Bad gateway".to_string(),
        };
        assert_eq!(err.user_message(), "Bad gateway");
        assert!(!err.is_authentication_failure());
    }

    #[test]
    fn test_user_message_fallback_for_local_failures() {
        let err = SessionError::Storage(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }
}
