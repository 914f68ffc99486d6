use cucumber::World;
use std::sync::Arc;

use user_lib::entities::User;
use user_lib::errors_service::UserServiceError;
use user_lib::repository::MemoryUserRepository;
use user_lib::user_service::UserService;

/// Each scenario starts from its own empty store.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct TestWorld {
    pub repo: Arc<MemoryUserRepository>,

    // Results
    pub user_result: Option<Result<User, UserServiceError>>,
    pub users_result: Option<Result<Vec<User>, UserServiceError>>,
    pub delete_result: Option<Result<(), UserServiceError>>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            repo: Arc::new(MemoryUserRepository::new()),
            user_result: None,
            users_result: None,
            delete_result: None,
        }
    }

    pub fn service(&self) -> UserService<MemoryUserRepository> {
        UserService::with_repo(Arc::clone(&self.repo))
    }

    pub fn user(&self) -> &User {
        match self.user_result.as_ref().expect("no user operation ran") {
            Ok(user) => user,
            Err(e) => panic!("user operation failed: {e:?}"),
        }
    }

    pub fn user_error(&self) -> &UserServiceError {
        match self.user_result.as_ref().expect("no user operation ran") {
            Ok(user) => panic!("expected an error, got {user:?}"),
            Err(e) => e,
        }
    }
}
