pub const USERS_PATH: &str = "/users";
pub const USER_BY_USERNAME_PATH: &str = "/users/{username}";

// Service routes
pub const SERVICE_HEALTH_PATH: &str = "/health";
pub const SERVICE_DOCS_PATH: &str = "/docs";
pub const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";
