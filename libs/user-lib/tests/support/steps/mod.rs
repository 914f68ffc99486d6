pub mod given;
pub mod then_user;
pub mod when_user;
