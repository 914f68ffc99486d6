use cucumber::given;
use serde_json::json;

use crate::support::world::TestWorld;

#[given("a clean user store")]
pub async fn clean_store(world: &mut TestWorld) {
    *world = TestWorld::new();
}

#[given(expr = "a user {string} exists with first name {string} and email {string}")]
pub async fn user_exists(world: &mut TestWorld, username: String, first_name: String, email: String) {
    let payload = json!({
        "username": username,
        "password": "password",
        "first_name": first_name,
        "last_name": "Ramel",
        "email": email,
        "photo_url": format!("http://{username}.com")
    });

    world
        .service()
        .create_user(&payload)
        .await
        .expect("seed user should be created");
}

#[given("the following users exist:")]
pub async fn users_exist(world: &mut TestWorld, step: &cucumber::gherkin::Step) {
    let table = step.table.as_ref().expect("step needs a table");
    let service = world.service();

    for row in table.rows.iter().skip(1) {
        let username = row.first().map(|s| s.as_str()).unwrap_or("");
        let first_name = row.get(1).map(|s| s.as_str()).unwrap_or("");
        let payload = json!({
            "username": username,
            "password": "password",
            "first_name": first_name,
            "last_name": "Doe",
            "email": format!("{username}@example.com"),
            "photo_url": format!("http://{username}.com")
        });
        service
            .create_user(&payload)
            .await
            .expect("table user should be created");
    }
}
