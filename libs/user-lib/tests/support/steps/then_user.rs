use cucumber::then;

use user_lib::entities::User;
use user_lib::errors_service::UserServiceError;

use crate::support::world::TestWorld;

fn field<'a>(user: &'a User, name: &str) -> &'a str {
    match name {
        "username" => &user.username,
        "first_name" => &user.first_name,
        "last_name" => &user.last_name,
        "email" => &user.email,
        "photo_url" => &user.photo_url,
        other => panic!("unknown user field {other}"),
    }
}

#[then(expr = "I should receive {int} user(s)")]
pub async fn receive_users(world: &mut TestWorld, count: usize) {
    let users = world
        .users_result
        .as_ref()
        .expect("no list operation ran")
        .as_ref()
        .expect("listing should succeed");
    assert_eq!(users.len(), count);
}

#[then(expr = "user number {int} should be {string}")]
pub async fn nth_user(world: &mut TestWorld, position: usize, username: String) {
    let users = world
        .users_result
        .as_ref()
        .expect("no list operation ran")
        .as_ref()
        .expect("listing should succeed");
    assert_eq!(users[position - 1].username, username);
}

#[then(expr = "the user should have {word} {string}")]
pub async fn user_has_field(world: &mut TestWorld, name: String, expected: String) {
    assert_eq!(field(world.user(), &name), expected);
}

#[then("the user should not be an admin")]
pub async fn user_not_admin(world: &mut TestWorld) {
    assert!(!world.user().is_admin);
}

#[then("I should receive a not found error")]
pub async fn not_found_error(world: &mut TestWorld) {
    assert!(matches!(world.user_error(), UserServiceError::NotFound));
}

#[then("I should receive a username already exists error")]
pub async fn username_exists_error(world: &mut TestWorld) {
    assert!(matches!(world.user_error(), UserServiceError::UsernameAlreadyExists));
}

#[then("I should receive the validation messages:")]
pub async fn validation_messages(world: &mut TestWorld, step: &cucumber::gherkin::Step) {
    let table = step.table.as_ref().expect("step needs a table");
    let expected: Vec<String> = table
        .rows
        .iter()
        .filter_map(|row| row.first().cloned())
        .collect();

    match world.user_error() {
        UserServiceError::Validation(messages) => assert_eq!(messages, &expected),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[then("the deletion should be successful")]
pub async fn deletion_successful(world: &mut TestWorld) {
    assert!(world.delete_result.as_ref().expect("no delete ran").is_ok());
}

#[then("the deletion should fail with a not found error")]
pub async fn deletion_not_found(world: &mut TestWorld) {
    let result = world.delete_result.as_ref().expect("no delete ran");
    assert!(matches!(result, Err(UserServiceError::NotFound)));
}
