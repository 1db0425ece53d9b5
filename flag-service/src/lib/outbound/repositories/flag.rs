use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::flag::models::Flag;
use crate::domain::flag::models::FlagId;
use crate::domain::flag::ports::FlagStore;
use crate::domain::user::models::UserId;
use crate::flag::errors::FlagError;

pub struct PostgresFlagStore {
    pool: PgPool,
}

impl PostgresFlagStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FlagStore for PostgresFlagStore {
    async fn list(&self, owner: UserId) -> Result<Vec<Flag>, FlagError> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT id, value
            FROM flags
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FlagError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(|(id, value)| Flag::new(id, value))
            .collect()
    }

    async fn upsert(&self, owner: UserId, flag: &Flag) -> Result<(), FlagError> {
        sqlx::query(
            r#"
            INSERT INTO flags (owner_id, id, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (owner_id, id)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(owner.0)
        .bind(flag.id.as_str())
        .bind(&flag.value)
        .execute(&self.pool)
        .await
        .map_err(|e| FlagError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, owner: UserId, id: &FlagId) -> Result<(), FlagError> {
        let result = sqlx::query(
            r#"
            DELETE FROM flags
            WHERE owner_id = $1 AND id = $2
            "#,
        )
        .bind(owner.0)
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| FlagError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(FlagError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
