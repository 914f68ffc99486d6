use serde::{Deserialize, Serialize};
use user_lib::entities::User;
use utoipa::ToSchema;

/// Documented shape of a create payload. Bodies are validated as raw JSON so
/// type errors can be reported per field.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub photo_url: String,
}

/// Documented shape of a patch payload. `username` and `is_admin` are rejected.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

/// Public view of a user. The only outbound user representation; it has no
/// `password` or `is_admin` field to leak.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub photo_url: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            photo_url: user.photo_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

impl From<User> for UserEnvelope {
    fn from(user: User) -> Self {
        UserEnvelope { user: user.into() }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

impl From<Vec<User>> for UsersResponse {
    fn from(users: Vec<User>) -> Self {
        UsersResponse {
            users: users.into_iter().map(UserResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn admin_user() -> User {
        User {
            username: "glenn".to_string(),
            password: SecretString::new("hunter2".to_string()),
            first_name: "Glenn".to_string(),
            last_name: "Ramel".to_string(),
            email: "glenn@glenn.com".to_string(),
            photo_url: "http://glenn.com".to_string(),
            is_admin: true,
        }
    }

    #[test]
    fn public_view_drops_password_and_admin_flag() {
        let json = serde_json::to_value(UserEnvelope::from(admin_user())).unwrap();
        let user = json["user"].as_object().unwrap();

        assert_eq!(user["username"], "glenn");
        assert_eq!(user.len(), 5);
        assert!(!user.contains_key("password"));
        assert!(!user.contains_key("is_admin"));
        assert!(!json.to_string().contains("hunter2"));
    }
}
