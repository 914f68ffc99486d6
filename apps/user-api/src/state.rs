use std::sync::Arc;
use user_lib::repository::traits::UserRepositoryTrait;
use user_lib::user_service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<dyn UserRepositoryTrait>>,
    pub env: String,
}

impl AppState {
    pub fn new(user_repo: Arc<dyn UserRepositoryTrait>, env: impl Into<String>) -> Self {
        Self {
            user_service: Arc::new(UserService::with_repo(user_repo)),
            env: env.into(),
        }
    }
}
