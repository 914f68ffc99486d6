use async_trait::async_trait;

use crate::entities::{NewUser, UserPatch};
use crate::repository::errors::UserRepositoryError;
use crate::repository::models::UserRow;

/// Persistence for the `users` table, keyed by username.
///
/// Each call is atomic from the caller's point of view: `update_user` and
/// `delete_user` observe a consistent pre-image of the row they touch.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn create_user(&self, user: &NewUser) -> Result<UserRow, UserRepositoryError>;
    async fn get_user(&self, username: &str) -> Result<Option<UserRow>, UserRepositoryError>;
    async fn get_users(&self) -> Result<Vec<UserRow>, UserRepositoryError>;
    /// Returns `None` when no row matches `username`.
    async fn update_user(&self, username: &str, patch: &UserPatch) -> Result<Option<UserRow>, UserRepositoryError>;
    /// Returns `false` when no row matches `username`.
    async fn delete_user(&self, username: &str) -> Result<bool, UserRepositoryError>;
    async fn delete_all_users(&self) -> Result<u64, UserRepositoryError>;
}
