use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::Credential;
use crate::domain::user::models::SignInCommand;
use crate::domain::user::models::SignUpCommand;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::CredentialStore;

/// Domain service implementation for sign-up and sign-in.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Shared hasher and token codec
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<Credential, UserError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())?;

        let credential = self.store.create(&command.email, &password_hash).await?;

        tracing::info!(user_id = %credential.id, "Credential registered");

        Ok(credential)
    }

    async fn sign_in(&self, command: SignInCommand) -> Result<AccessToken, UserError> {
        let Some(credential) = self.store.find_by_email(&command.email).await? else {
            tracing::debug!("Sign-in rejected: unknown email");
            return Err(UserError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(
                credential.id.0,
                command.password.expose(),
                &credential.password_hash,
                Utc::now().timestamp(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %credential.id, "Sign-in rejected: wrong password");
                    UserError::InvalidCredentials
                }
                AuthenticationError::PasswordError(e) => UserError::Password(e),
                AuthenticationError::TokenError(e) => UserError::Token(e),
            })?;

        Ok(AccessToken(result.access_token))
    }
}
