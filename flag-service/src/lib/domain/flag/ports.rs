use async_trait::async_trait;

use crate::domain::flag::models::Flag;
use crate::domain::flag::models::FlagId;
use crate::domain::user::models::UserId;
use crate::flag::errors::FlagError;

/// Port for flag operations, always scoped to the authenticated owner.
#[async_trait]
pub trait FlagServicePort: Send + Sync + 'static {
    /// List the owner's flags, sorted by id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_flags(&self, owner: UserId) -> Result<Vec<Flag>, FlagError>;

    /// Create a flag or replace the value of an existing one.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn put_flag(&self, owner: UserId, flag: Flag) -> Result<(), FlagError>;

    /// Delete a flag by id.
    ///
    /// # Errors
    /// * `NotFound` - The owner has no flag with this id
    /// * `DatabaseError` - Database operation failed
    async fn delete_flag(&self, owner: UserId, id: &FlagId) -> Result<(), FlagError>;
}

/// Persistence operations for flags.
#[async_trait]
pub trait FlagStore: Send + Sync + 'static {
    /// Retrieve all flags of an owner ordered by id.
    async fn list(&self, owner: UserId) -> Result<Vec<Flag>, FlagError>;

    /// Insert or update a flag.
    async fn upsert(&self, owner: UserId, flag: &Flag) -> Result<(), FlagError>;

    /// Remove a flag.
    ///
    /// # Errors
    /// * `NotFound` - Nothing was deleted
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, owner: UserId, id: &FlagId) -> Result<(), FlagError>;
}
