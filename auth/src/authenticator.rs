use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Claims;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Authentication coordinator combining password verification and token issuance.
///
/// Built once at startup from the process signing key and shared read-only.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator with the default hasher cost and token TTL.
    ///
    /// # Arguments
    /// * `signing_key` - Secret key for token signing
    ///
    /// # Errors
    /// * `EmptySigningKey` - The key is empty
    pub fn new(signing_key: &[u8]) -> Result<Self, TokenError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(signing_key)?,
        })
    }

    /// Replace the password hasher (e.g. to apply a configured work factor).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Override the token lifetime.
    pub fn with_token_ttl(mut self, ttl_seconds: i64) -> Self {
        self.token_codec = self.token_codec.with_ttl(ttl_seconds);
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `user_id` - Principal the token is issued to
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `now` - Current Unix timestamp, used as issued-at
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        user_id: i64,
        password: &str,
        stored_hash: &str,
        now: i64,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_codec.issue(user_id, now)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn issue_token(&self, user_id: i64, now: i64) -> Result<String, TokenError> {
        self.token_codec.issue(user_id, now)
    }

    /// Validate a token and return its claims.
    ///
    /// # Errors
    /// * `Malformed`, `InvalidSignature` or `Expired`
    pub fn validate_token(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        self.token_codec.validate(token, now)
    }
}
