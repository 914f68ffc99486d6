use cucumber::gherkin::Step;
use cucumber::when;
use serde_json::Value;

use crate::support::world::TestWorld;

fn docstring_payload(step: &Step) -> Value {
    let docstring = step.docstring.as_ref().expect("step needs a JSON docstring");
    serde_json::from_str(docstring).expect("docstring should be valid JSON")
}

#[when("I list all users")]
pub async fn list_users(world: &mut TestWorld) {
    world.users_result = Some(world.service().get_users().await);
}

#[when("I create a user with:")]
pub async fn create_user(world: &mut TestWorld, step: &Step) {
    let payload = docstring_payload(step);
    world.user_result = Some(world.service().create_user(&payload).await);
}

#[when(expr = "I fetch the user {string}")]
pub async fn fetch_user(world: &mut TestWorld, username: String) {
    world.user_result = Some(world.service().get_user(&username).await);
}

#[when(expr = "I update the user {string} with:")]
pub async fn update_user(world: &mut TestWorld, username: String, step: &Step) {
    let payload = docstring_payload(step);
    world.user_result = Some(world.service().update_user(&username, &payload).await);
}

#[when(expr = "I delete the user {string}")]
pub async fn delete_user(world: &mut TestWorld, username: String) {
    world.delete_result = Some(world.service().delete_user(&username).await);
}
