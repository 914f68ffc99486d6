//! Seed data loading
//!
//! Inserts fixture users through the validated create path. Seeding is
//! idempotent: usernames that already exist are skipped, not overwritten.

use serde_json::Value;

use crate::errors_service::UserServiceError;
use crate::repository::traits::UserRepositoryTrait;
use crate::user_service::UserService;

/// Outcome of a seeding run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

/// Parse a seed document: a JSON array of user create payloads.
pub fn parse_seed_document(document: &str) -> Result<Vec<Value>, UserServiceError> {
    let value: Value = serde_json::from_str(document)
        .map_err(|e| UserServiceError::Validation(vec![format!("invalid seed document: {e}")]))?;

    match value {
        Value::Array(payloads) => Ok(payloads),
        _ => Err(UserServiceError::Validation(vec![
            "seed document must be a JSON array of users".to_string(),
        ])),
    }
}

/// Create every user in `payloads`.
///
/// Stops at the first payload that fails validation or hits a store error;
/// users created before that point stay in place.
pub async fn seed_users<U>(
    service: &UserService<U>,
    payloads: &[Value],
) -> Result<SeedReport, UserServiceError>
where
    U: UserRepositoryTrait + ?Sized,
{
    let mut report = SeedReport::default();

    for payload in payloads {
        let username = payload
            .get("username")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match service.create_user(payload).await {
            Ok(user) => report.created.push(user.username),
            Err(UserServiceError::UsernameAlreadyExists) => {
                tracing::info!(username = %username, "seed user already exists, skipping");
                report.skipped.push(username);
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        created = report.created.len(),
        skipped = report.skipped.len(),
        "seeding finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryUserRepository;
    use serde_json::json;
    use std::sync::Arc;

    fn glenn() -> Value {
        json!({
            "username": "glenn",
            "password": "password",
            "first_name": "Glenn",
            "last_name": "Ramel",
            "email": "glenn@glenn.com",
            "photo_url": "http://glenn.com"
        })
    }

    #[test]
    fn parse_seed_document_accepts_array() {
        let payloads = parse_seed_document(&json!([glenn()]).to_string()).unwrap();
        assert_eq!(payloads.len(), 1);
    }

    #[test]
    fn parse_seed_document_rejects_object() {
        let result = parse_seed_document(&glenn().to_string());
        assert!(matches!(result, Err(UserServiceError::Validation(_))));
    }

    #[test]
    fn parse_seed_document_rejects_garbage() {
        let result = parse_seed_document("not json");
        assert!(matches!(result, Err(UserServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn seeding_twice_skips_existing_users() {
        let service = UserService::with_repo(Arc::new(MemoryUserRepository::new()));

        let first = seed_users(&service, &[glenn()]).await.unwrap();
        let second = seed_users(&service, &[glenn()]).await.unwrap();

        assert_eq!(first.created, vec!["glenn"]);
        assert!(first.skipped.is_empty());
        assert!(second.created.is_empty());
        assert_eq!(second.skipped, vec!["glenn"]);
        assert_eq!(service.get_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn seeding_stops_on_invalid_payload() {
        let service = UserService::with_repo(Arc::new(MemoryUserRepository::new()));
        let invalid = json!({ "username": "bob" });

        let result = seed_users(&service, &[glenn(), invalid]).await;

        assert!(matches!(result, Err(UserServiceError::Validation(_))));
        assert!(service.get_user("glenn").await.is_ok());
    }
}
