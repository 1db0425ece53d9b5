use async_trait::async_trait;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::Credential;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::SignInCommand;
use crate::domain::user::models::SignUpCommand;
use crate::user::errors::UserError;

/// Port for credential registration and sign-in.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new credential.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// Created credential with its store-assigned id
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<Credential, UserError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// Signed session token for the credential's id
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Token` - Token generation failed
    /// * `DatabaseError` - Database operation failed
    async fn sign_in(&self, command: SignInCommand) -> Result<AccessToken, UserError>;
}

/// Persistence operations for credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new credential atomically.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<Credential, UserError>;

    /// Retrieve a credential by email.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Credential>, UserError>;
}
