use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::entities::{NewUser, User, UserPatch};
use crate::errors_service::UserServiceError;
use crate::repository::traits::UserRepositoryTrait;
use crate::repository::UserRepository;
use crate::schema::{self, Schema, NEW_USER_SCHEMA, USER_PATCH_SCHEMA};

/// Validates `payload` against `schema` and decodes it once it conforms.
fn parse_payload<T: DeserializeOwned>(schema: &Schema, payload: &Value) -> Result<T, UserServiceError> {
    let errors = schema::validate(schema, payload)?;
    if !errors.is_empty() {
        return Err(UserServiceError::Validation(schema::messages(&errors)));
    }
    serde_json::from_value(payload.clone())
        .map_err(|e| UserServiceError::Validation(vec![e.to_string()]))
}

pub struct UserService<U = UserRepository>
where
    U: UserRepositoryTrait + ?Sized,
{
    pub user_repo: Arc<U>,
}

impl<U> Clone for UserService<U>
where
    U: UserRepositoryTrait + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            user_repo: Arc::clone(&self.user_repo),
        }
    }
}

impl UserService<UserRepository> {
    pub fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
        }
    }
}

impl<U> UserService<U>
where
    U: UserRepositoryTrait + ?Sized,
{
    pub fn with_repo(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn get_users(&self) -> Result<Vec<User>, UserServiceError> {
        let rows = self
            .user_repo
            .get_users()
            .await
            .map_err(UserServiceError::from)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Validate a raw create payload and insert it. `is_admin` always starts out false.
    pub async fn create_user(&self, payload: &Value) -> Result<User, UserServiceError> {
        let new_user: NewUser = parse_payload(&NEW_USER_SCHEMA, payload)?;
        let row = self
            .user_repo
            .create_user(&new_user)
            .await
            .map_err(UserServiceError::from)?;

        tracing::info!(username = %row.username, "user created");
        Ok(User::from(row))
    }

    pub async fn get_user(&self, username: &str) -> Result<User, UserServiceError> {
        self.user_repo
            .get_user(username)
            .await
            .map_err(UserServiceError::from)?
            .map(User::from)
            .ok_or(UserServiceError::NotFound)
    }

    /// Apply a partial update. The patch schema has no `username` field, so
    /// the identity of a user can never change through this path.
    pub async fn update_user(&self, username: &str, payload: &Value) -> Result<User, UserServiceError> {
        let patch: UserPatch = parse_payload(&USER_PATCH_SCHEMA, payload)?;
        let row = self
            .user_repo
            .update_user(username, &patch)
            .await
            .map_err(UserServiceError::from)?
            .ok_or(UserServiceError::NotFound)?;

        tracing::info!(username = %row.username, "user updated");
        Ok(User::from(row))
    }

    pub async fn delete_user(&self, username: &str) -> Result<(), UserServiceError> {
        let deleted = self
            .user_repo
            .delete_user(username)
            .await
            .map_err(UserServiceError::from)?;
        if !deleted {
            return Err(UserServiceError::NotFound);
        }

        tracing::info!(username = %username, "user deleted");
        Ok(())
    }

    /// Remove every user. Returns how many rows were deleted.
    pub async fn clear_users(&self) -> Result<u64, UserServiceError> {
        let removed = self
            .user_repo
            .delete_all_users()
            .await
            .map_err(UserServiceError::from)?;

        tracing::info!(removed, "users cleared");
        Ok(removed)
    }
}
