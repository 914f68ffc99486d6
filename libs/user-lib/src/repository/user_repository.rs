use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::{query, query_as, MySqlPool};

use crate::entities::{NewUser, UserPatch};
use crate::repository::errors::UserRepositoryError;
use crate::repository::models::UserRow;
use crate::repository::traits::UserRepositoryTrait;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pub pool: MySqlPool,
}

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, user: &NewUser) -> Result<UserRow, UserRepositoryError> {
        query(
            r#"
            INSERT INTO users (username, password, first_name, last_name, email, photo_url)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&user.username)
        .bind(user.password.expose_secret())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.photo_url)
        .execute(&self.pool)
        .await
        .map_err(UserRepositoryError::from)?;

        let row = query_as::<_, UserRow>(
            r#"
            SELECT username, password, first_name, last_name, email, photo_url, is_admin
            FROM users WHERE username = ?
            "#
        )
        .bind(&user.username)
        .fetch_one(&self.pool)
        .await
        .map_err(UserRepositoryError::from)?;

        Ok(row)
    }

    async fn get_user(&self, username: &str) -> Result<Option<UserRow>, UserRepositoryError> {
        let user = query_as::<_, UserRow>(
            r#"
            SELECT username, password, first_name, last_name, email, photo_url, is_admin
            FROM users WHERE username = ?
            "#
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(UserRepositoryError::from)?;

        Ok(user)
    }

    async fn get_users(&self) -> Result<Vec<UserRow>, UserRepositoryError> {
        let users = query_as::<_, UserRow>(
            r#"
            SELECT username, password, first_name, last_name, email, photo_url, is_admin
            FROM users ORDER BY username
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(UserRepositoryError::from)?;

        Ok(users)
    }

    async fn update_user(&self, username: &str, patch: &UserPatch) -> Result<Option<UserRow>, UserRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(UserRepositoryError::from)?;

        // Lock the row so the update applies to the pre-image we just checked.
        let existing = query_as::<_, UserRow>(
            r#"
            SELECT username, password, first_name, last_name, email, photo_url, is_admin
            FROM users WHERE username = ? FOR UPDATE
            "#
        )
        .bind(username)
        .fetch_optional(&mut *tx)
        .await
        .map_err(UserRepositoryError::from)?;

        if existing.is_none() {
            tx.rollback().await.map_err(UserRepositoryError::from)?;
            return Ok(None);
        }

        if !patch.is_empty() {
            query(
                r#"
                UPDATE users
                SET password = COALESCE(?, password),
                    first_name = COALESCE(?, first_name),
                    last_name = COALESCE(?, last_name),
                    email = COALESCE(?, email),
                    photo_url = COALESCE(?, photo_url)
                WHERE username = ?
                "#
            )
            .bind(patch.password.as_ref().map(|p| p.expose_secret().as_str()))
            .bind(patch.first_name.as_deref())
            .bind(patch.last_name.as_deref())
            .bind(patch.email.as_deref())
            .bind(patch.photo_url.as_deref())
            .bind(username)
            .execute(&mut *tx)
            .await
            .map_err(UserRepositoryError::from)?;
        }

        let user = query_as::<_, UserRow>(
            r#"
            SELECT username, password, first_name, last_name, email, photo_url, is_admin
            FROM users WHERE username = ?
            "#
        )
        .bind(username)
        .fetch_one(&mut *tx)
        .await
        .map_err(UserRepositoryError::from)?;

        tx.commit().await.map_err(UserRepositoryError::from)?;

        Ok(Some(user))
    }

    async fn delete_user(&self, username: &str) -> Result<bool, UserRepositoryError> {
        let result = query(
            r#"
            DELETE FROM users WHERE username = ?
            "#
        )
        .bind(username)
        .execute(&self.pool)
        .await
        .map_err(UserRepositoryError::from)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_users(&self) -> Result<u64, UserRepositoryError> {
        let result = query("DELETE FROM users")
            .execute(&self.pool)
            .await
            .map_err(UserRepositoryError::from)?;

        Ok(result.rows_affected())
    }
}
