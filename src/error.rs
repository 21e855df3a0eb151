//! Error types for token issuing and verification.
//!
//! Configuration problems and untrusted-input problems are kept apart so
//! callers can reject a request without mistaking it for a deployment fault.

use thiserror::Error;

/// Reason a token was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTokenKind {
    /// The token does not consist of exactly three `.`-separated segments.
    #[error("malformed token")]
    Malformed,

    /// The signature segment does not match the recomputed signature.
    #[error("signature mismatch")]
    SignatureMismatch,

    /// The payload segment is not base64url-encoded JSON object.
    #[error("malformed payload")]
    MalformedPayload,
}

/// Errors produced by [`Config`](crate::Config) and [`Tokenizer`](crate::Tokenizer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// A required setting is missing or empty.
    #[error("Setting \"{setting}\" is not specified")]
    Configuration {
        /// Name of the missing setting
        setting: String,
    },

    /// The token is malformed or was not signed with the configured key.
    #[error("Invalid token: {0}")]
    InvalidToken(InvalidTokenKind),

    /// A claims map could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TokenError {
    /// Create a configuration error for the given setting.
    #[must_use]
    pub fn config(setting: impl Into<String>) -> Self {
        TokenError::Configuration {
            setting: setting.into(),
        }
    }

    /// Whether this error was caused by missing configuration.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, TokenError::Configuration { .. })
    }

    /// Whether this error was caused by an untrusted or garbled token.
    #[must_use]
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, TokenError::InvalidToken(_))
    }

    /// The rejection reason, if this is an invalid-token error.
    #[must_use]
    pub fn invalid_token_kind(&self) -> Option<InvalidTokenKind> {
        match self {
            TokenError::InvalidToken(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<InvalidTokenKind> for TokenError {
    fn from(kind: InvalidTokenKind) -> Self {
        TokenError::InvalidToken(kind)
    }
}

impl From<serde_json::Error> for TokenError {
    fn from(err: serde_json::Error) -> Self {
        TokenError::Serialization(err.to_string())
    }
}
