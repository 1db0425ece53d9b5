use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::user::models::Credential;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::UserError;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn create(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<Credential, UserError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return UserError::EmailAlreadyExists(email.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(Credential {
            id: UserId(id),
            email: email.clone(),
            password_hash: password_hash.to_string(),
        })
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Credential>, UserError> {
        let row: Option<(i64, String, String)> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        match row {
            Some((id, email, password_hash)) => Ok(Some(Credential {
                id: UserId(id),
                email: EmailAddress::new(email)?,
                password_hash,
            })),
            None => Ok(None),
        }
    }
}
