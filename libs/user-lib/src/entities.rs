use secrecy::SecretString;
use serde::Deserialize;

use crate::repository::models::UserRow;

/// A stored user.
///
/// Deliberately not `Serialize`: outbound representations go through a
/// public projection that leaves out `password` and `is_admin`.
#[derive(Debug)]
pub struct User {
    pub username: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub photo_url: String,
    pub is_admin: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            username: row.username,
            password: SecretString::new(row.password),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            photo_url: row.photo_url,
            is_admin: row.is_admin,
        }
    }
}

/// Payload accepted when creating a user. `is_admin` is never read from input.
#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub photo_url: String,
}

/// Partial replacement of the mutable user fields. `None` keeps the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct UserPatch {
    pub password: Option<SecretString>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.photo_url.is_none()
    }
}
