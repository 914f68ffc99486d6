use crate::repository::errors::UserRepositoryError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UserServiceError {
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("User does not exist")]
    NotFound,

    #[error("User already exists")]
    UsernameAlreadyExists,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<UserRepositoryError> for UserServiceError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::UsernameAlreadyExists => UserServiceError::UsernameAlreadyExists,
            UserRepositoryError::NotFound => UserServiceError::NotFound,
            UserRepositoryError::Sqlx(e) => UserServiceError::Internal(e.into()),
        }
    }
}
