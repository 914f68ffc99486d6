pub mod create_user;
pub mod delete_user;
pub mod entities;
pub mod get_user;
pub mod get_users;
pub mod health_check;
pub mod routes;
pub mod update_user;
