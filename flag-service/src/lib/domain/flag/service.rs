use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::flag::models::Flag;
use crate::domain::flag::models::FlagId;
use crate::domain::user::models::UserId;
use crate::flag::errors::FlagError;
use crate::flag::ports::FlagServicePort;
use crate::flag::ports::FlagStore;

/// Domain service implementation for flag operations.
pub struct FlagService<FS>
where
    FS: FlagStore,
{
    store: Arc<FS>,
}

impl<FS> FlagService<FS>
where
    FS: FlagStore,
{
    pub fn new(store: Arc<FS>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<FS> FlagServicePort for FlagService<FS>
where
    FS: FlagStore,
{
    async fn list_flags(&self, owner: UserId) -> Result<Vec<Flag>, FlagError> {
        self.store.list(owner).await
    }

    async fn put_flag(&self, owner: UserId, flag: Flag) -> Result<(), FlagError> {
        self.store.upsert(owner, &flag).await?;

        tracing::debug!(owner = %owner, flag_id = %flag.id, "Flag stored");

        Ok(())
    }

    async fn delete_flag(&self, owner: UserId, id: &FlagId) -> Result<(), FlagError> {
        self.store.delete(owner, id).await?;

        tracing::debug!(owner = %owner, flag_id = %id, "Flag deleted");

        Ok(())
    }
}
