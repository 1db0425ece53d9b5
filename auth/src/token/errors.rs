use thiserror::Error;

/// Error type for session token operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Signing key must not be empty")]
    EmptySigningKey,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}
