//! User registration and token authentication over the REST API.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::time::Duration;
use todo_probe::api::params::{auth_params, task_creation_params};
use todo_probe::api::{auth_header, encode_token};
use todo_probe::fixture::MAX_TAG_LEN;
use todo_probe::{random_tag, ApiFixture, Auth, ExpectedTask, Task, TokenInfo};

const NEW_USER: &str = "new_user";
const NEW_PASSWORD: &str = "new_pass!@_(DSF*&fksdjh%^^#kjhdfglfdlh1232138&&*7dsflk459(((9dsfw&&*";

async fn tasks(fx: &ApiFixture) -> Vec<Task> {
    fx.api.list_tasks().await.unwrap().json().await.unwrap()
}

async fn token(fx: &ApiFixture) -> TokenInfo {
    let creds = fx.credentials();
    let info: TokenInfo = fx
        .api
        .authenticate(&auth_params(&creds.username, &creds.password), true)
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!info.token.is_empty(), "Couldn't obtain token from json response");
    assert!(info.expires > 0, "Couldn't obtain expiration period from json response");
    info
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_create_new_user_valid_fields() {
    let fx = common::fixture("test_create_new_user_valid_fields").await;
    let tag = random_tag(MAX_TAG_LEN);

    fx.step(1, "Create new user");
    fx.api.create_user(&auth_params(NEW_USER, NEW_PASSWORD), true).await.unwrap();

    fx.step(2, "Create new valid task with new user");
    let task: Task = fx
        .api
        .create_task(
            &task_creation_params("test_title1", &[&tag]),
            &Auth::basic(NEW_USER, NEW_PASSWORD),
            true,
        )
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    ExpectedTask::new("test_title1", NEW_USER).with_tags([tag]).check(&task).unwrap();
}

#[tokio::test]
async fn test_new_user_with_duplicate_username() {
    let fx = common::fixture("test_new_user_with_duplicate_username").await;
    let rsp = fx.api.create_user(&auth_params("QA", NEW_PASSWORD), false).await.unwrap();
    assert_ne!(rsp.status(), 200, "Changing password of existing user is not permitted");

    fx.step(2, "Old password still works");
    let params = task_creation_params("test_title", &[random_tag(MAX_TAG_LEN)]);
    fx.api.create_task(&params, &fx.auth(), true).await.unwrap();
}

#[tokio::test]
async fn test_new_user_with_duplicate_password() {
    let fx = common::fixture("test_new_user_with_duplicate_password").await;
    let rsp = fx.api.create_user(&auth_params(NEW_USER, "willWin"), false).await.unwrap();
    assert_eq!(rsp.status(), 200, "Couldn't create new user with duplicate password");
}

// ============================================================================
// Tokens
// ============================================================================

#[tokio::test]
async fn test_adding_task_with_token() {
    let fx = common::fixture("test_adding_task_with_token").await;
    let tag = random_tag(MAX_TAG_LEN);

    fx.step(1, "Get authentication token");
    let info = token(&fx).await;

    fx.step(2, "Create a new task using token for authorization");
    let params = task_creation_params("test_title", &[&tag]);
    fx.api.create_task(&params, &Auth::token(info.token), true).await.unwrap();

    fx.step(3, "Obtain list of tasks - there is 1 task present");
    let all = tasks(&fx).await;
    assert_eq!(all.len(), 1);
    ExpectedTask::new("test_title", "QA").with_tags([tag]).check(&all[0]).unwrap();
}

#[tokio::test]
async fn test_adding_task_with_incorrect_token() {
    let fx = common::fixture("test_adding_task_with_incorrect_token").await;
    let info = token(&fx).await;
    let forged = format!("{}extra", info.token);
    assert_eq!(
        auth_header(&encode_token(&forged)),
        format!("Basic {}", encode_token(&forged))
    );

    fx.step(2, "Create a new task using a different token for authorization");
    let params = task_creation_params("test_title", &[random_tag(MAX_TAG_LEN)]);
    let rsp = fx.api.create_task(&params, &Auth::token(forged), false).await.unwrap();
    assert_eq!(rsp.status(), 401, "Tasks should not be created without proper authentication");

    fx.step(3, "Obtain list of tasks - there should be none");
    assert!(tasks(&fx).await.is_empty());
}

#[tokio::test]
async fn test_adding_task_with_expired_token() {
    let fx = common::fixture_with("test_adding_task_with_expired_token", Duration::from_secs(1)).await;
    let tag = random_tag(MAX_TAG_LEN);

    fx.step(1, "Get authentication token");
    let info = token(&fx).await;
    assert_eq!(info.expires, 1);
    let auth = Auth::token(info.token);

    fx.step(2, "Create a new task using token for authorization before expiration");
    let params = task_creation_params("test_title", &[&tag]);
    fx.api.create_task(&params, &auth, true).await.unwrap();

    fx.step(3, "Obtain list of tasks - there is 1 task present");
    let all = tasks(&fx).await;
    assert_eq!(all.len(), 1);
    ExpectedTask::new("test_title", "QA").with_tags([tag.as_str()]).check(&all[0]).unwrap();

    fx.step(4, "Create a new task using token for authorization after expiration");
    tokio::time::sleep(Duration::from_secs(info.expires) + Duration::from_millis(200)).await;
    let params = task_creation_params("test_title_new", &[&tag]);
    let rsp = fx.api.create_task(&params, &auth, false).await.unwrap();
    assert_eq!(rsp.status(), 401, "Tasks must not be created with expired token");

    fx.step(5, "Obtain list of tasks - there is 1 task present");
    assert_eq!(tasks(&fx).await.len(), 1);
}

#[tokio::test]
async fn test_auth_nonexistent_user() {
    let fx = common::fixture("test_auth_nonexistent_user").await;
    let rsp = fx
        .api
        .authenticate(&auth_params(NEW_USER, "willWin"), false)
        .await
        .unwrap();
    assert_eq!(rsp.status(), 401, "Auth token must not be created for nonexistent users");
}

#[tokio::test]
async fn test_tokens_do_not_survive_reset() {
    let fx = common::fixture("test_tokens_do_not_survive_reset").await;
    let info = token(&fx).await;
    fx.api.reset().await.unwrap();

    let params = task_creation_params("test_title", &[random_tag(MAX_TAG_LEN)]);
    let rsp = fx.api.create_task(&params, &Auth::token(info.token), false).await.unwrap();
    assert_eq!(rsp.status(), 401);
}
