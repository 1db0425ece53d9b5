use thiserror::Error;

/// Error for sign-up / sign-in input validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("Both email & password are required to be not empty")]
    Empty,
}

/// Top-level error for all credential-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("{0}")]
    InvalidInput(#[from] CredentialsError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),

    // Domain-level errors
    #[error("User with email: {0} already exists")]
    EmailAlreadyExists(String),

    /// Unknown email or wrong password; the two are never distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
