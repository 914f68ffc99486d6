use std::collections::BTreeMap;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

use crate::entities::{NewUser, UserPatch};
use crate::repository::errors::UserRepositoryError;
use crate::repository::models::UserRow;
use crate::repository::traits::UserRepositoryTrait;

/// In-process users store for local runs and isolated tests.
///
/// Rows are kept sorted by username so listing matches the MySQL store.
/// Every operation holds the lock for its whole duration.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    rows: RwLock<BTreeMap<String, UserRow>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepositoryTrait for MemoryUserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<UserRow, UserRepositoryError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&user.username) {
            return Err(UserRepositoryError::UsernameAlreadyExists);
        }

        let row = UserRow {
            username: user.username.clone(),
            password: user.password.expose_secret().clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            photo_url: user.photo_url.clone(),
            is_admin: false,
        };
        rows.insert(row.username.clone(), row.clone());
        Ok(row)
    }

    async fn get_user(&self, username: &str) -> Result<Option<UserRow>, UserRepositoryError> {
        Ok(self.rows.read().await.get(username).cloned())
    }

    async fn get_users(&self) -> Result<Vec<UserRow>, UserRepositoryError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn update_user(&self, username: &str, patch: &UserPatch) -> Result<Option<UserRow>, UserRepositoryError> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.get_mut(username) else {
            return Ok(None);
        };

        if let Some(password) = &patch.password {
            row.password = password.expose_secret().clone();
        }
        if let Some(first_name) = &patch.first_name {
            row.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            row.last_name = last_name.clone();
        }
        if let Some(email) = &patch.email {
            row.email = email.clone();
        }
        if let Some(photo_url) = &patch.photo_url {
            row.photo_url = photo_url.clone();
        }

        Ok(Some(row.clone()))
    }

    async fn delete_user(&self, username: &str) -> Result<bool, UserRepositoryError> {
        Ok(self.rows.write().await.remove(username).is_some())
    }

    async fn delete_all_users(&self) -> Result<u64, UserRepositoryError> {
        let mut rows = self.rows.write().await;
        let removed = rows.len() as u64;
        rows.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: SecretString::new("password".to_string()),
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
            email: format!("{username}@example.com"),
            photo_url: format!("http://{username}.com"),
        }
    }

    #[tokio::test]
    async fn create_defaults_is_admin_to_false() {
        let repo = MemoryUserRepository::new();

        let row = repo.create_user(&new_user("glenn")).await.unwrap();

        assert_eq!(row.username, "glenn");
        assert!(!row.is_admin);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_username() {
        let repo = MemoryUserRepository::new();
        repo.create_user(&new_user("glenn")).await.unwrap();

        let result = repo.create_user(&new_user("glenn")).await;

        assert!(matches!(result, Err(UserRepositoryError::UsernameAlreadyExists)));
    }

    #[tokio::test]
    async fn usernames_are_case_sensitive() {
        let repo = MemoryUserRepository::new();
        repo.create_user(&new_user("glenn")).await.unwrap();

        assert!(repo.get_user("GLENN").await.unwrap().is_none());
        assert!(repo.create_user(&new_user("Glenn")).await.is_ok());
        assert_eq!(repo.get_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn users_are_listed_by_username() {
        let repo = MemoryUserRepository::new();
        repo.create_user(&new_user("zoe")).await.unwrap();
        repo.create_user(&new_user("adam")).await.unwrap();

        let names: Vec<String> = repo
            .get_users()
            .await
            .unwrap()
            .into_iter()
            .map(|row| row.username)
            .collect();

        assert_eq!(names, vec!["adam", "zoe"]);
    }

    #[tokio::test]
    async fn update_replaces_only_present_fields() {
        let repo = MemoryUserRepository::new();
        repo.create_user(&new_user("glenn")).await.unwrap();
        let patch = UserPatch {
            email: Some("glenn1@glenn.com".to_string()),
            ..UserPatch::default()
        };

        let row = repo.update_user("glenn", &patch).await.unwrap().unwrap();

        assert_eq!(row.email, "glenn1@glenn.com");
        assert_eq!(row.first_name, "First");
        assert_eq!(row.password, "password");
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let repo = MemoryUserRepository::new();

        assert!(repo.update_user("bob", &UserPatch::default()).await.unwrap().is_none());
        assert!(!repo.delete_user("bob").await.unwrap());
    }

    #[tokio::test]
    async fn delete_all_reports_removed_count() {
        let repo = MemoryUserRepository::new();
        repo.create_user(&new_user("a")).await.unwrap();
        repo.create_user(&new_user("b")).await.unwrap();

        assert_eq!(repo.delete_all_users().await.unwrap(), 2);
        assert!(repo.get_users().await.unwrap().is_empty());
    }
}
