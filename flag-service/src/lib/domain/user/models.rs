use std::fmt;

use crate::user::errors::CredentialsError;

/// Stored credential.
///
/// Never holds a plaintext password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// User unique identifier, assigned by the credential store.
///
/// This is the principal carried by session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Sign-in identifier.
///
/// Only required to be non-empty; the format is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: String) -> Result<Self, CredentialsError> {
        if email.is_empty() {
            return Err(CredentialsError::Empty);
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password, non-empty. Redacted from debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(password: String) -> Result<Self, CredentialsError> {
        if password.is_empty() {
            return Err(CredentialsError::Empty);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// Command to register a new credential
#[derive(Debug)]
pub struct SignUpCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl SignUpCommand {
    /// Construct a sign-up command from raw input.
    ///
    /// # Errors
    /// * `Empty` - Email or password is empty
    pub fn new(email: String, password: String) -> Result<Self, CredentialsError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: Password::new(password)?,
        })
    }
}

/// Command to exchange credentials for a session token
#[derive(Debug)]
pub struct SignInCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl SignInCommand {
    /// Construct a sign-in command from raw input.
    ///
    /// # Errors
    /// * `Empty` - Email or password is empty
    pub fn new(email: String, password: String) -> Result<Self, CredentialsError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: Password::new(password)?,
        })
    }
}

/// Signed session token returned by a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
