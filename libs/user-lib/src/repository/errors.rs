#[derive(Debug, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("username already exists")]
    UsernameAlreadyExists,

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for UserRepositoryError {
    fn from(value: sqlx::Error) -> Self {
        map_sqlx_error(value)
    }
}

fn extract_mysql_key_name(msg_lower: &str) -> Option<String> {
    // msg_lower is already lowercased
    let marker = "for key '";
    let start = msg_lower.find(marker)? + marker.len();
    let rest = &msg_lower[start..];
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}

/// True for MySQL "Duplicate entry '...' for key '...'" errors (SQLSTATE 23000).
fn is_duplicate_key(code: Option<&str>, msg_lower: &str) -> bool {
    code == Some("23000") && msg_lower.contains("duplicate entry") && msg_lower.contains("for key")
}

pub fn map_sqlx_error(err: sqlx::Error) -> UserRepositoryError {
    // The users table is keyed by username, so a primary key clash is a username clash.
    const USERS_PRIMARY_KEY: &str = "primary";

    match &err {
        sqlx::Error::RowNotFound => return UserRepositoryError::NotFound,
        sqlx::Error::Database(db_err) => {
            let msg = db_err.message().to_lowercase();
            if is_duplicate_key(db_err.code().as_deref(), &msg) {
                // MySQL 8 prefixes the key with the table: "users.PRIMARY".
                let key = extract_mysql_key_name(&msg).unwrap_or_default();
                if key.ends_with(USERS_PRIMARY_KEY) {
                    return UserRepositoryError::UsernameAlreadyExists;
                }
            }
        }
        _ => {}
    }

    UserRepositoryError::Sqlx(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_table_prefixed_key() {
        let msg = "duplicate entry 'glenn' for key 'users.primary'";
        assert_eq!(extract_mysql_key_name(msg).as_deref(), Some("users.primary"));
    }

    #[test]
    fn extract_returns_none_without_marker() {
        assert_eq!(extract_mysql_key_name("deadlock found when trying to get lock"), None);
    }

    #[test]
    fn duplicate_key_requires_integrity_code() {
        let msg = "duplicate entry 'glenn' for key 'primary'";
        assert!(is_duplicate_key(Some("23000"), msg));
        assert!(!is_duplicate_key(Some("40001"), msg));
        assert!(!is_duplicate_key(None, msg));
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            UserRepositoryError::NotFound
        ));
    }

    #[test]
    fn other_errors_are_wrapped() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            UserRepositoryError::Sqlx(sqlx::Error::PoolTimedOut)
        ));
    }
}
