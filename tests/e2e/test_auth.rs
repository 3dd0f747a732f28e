use crate::e2e::helpers;

use helpers::{assertions::assert_token_response, TestContext, TEST_PASSWORD, TEST_USERNAME};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_issue_token_for_configured_account(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/auth/login",
            &json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_token_response(body);
    assert_eq!(
        body["expires_in"].as_i64(),
        Some(ctx.config.jwt_expiration_hours * 3600)
    );

    // The issued token opens protected routes
    let token = body["token"].as_str().unwrap();
    let response = ctx.client.get_with_auth("/api/languages", token).await.unwrap();
    response.assert_status(StatusCode::OK);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_wrong_password(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/auth/login",
            &json!({ "username": TEST_USERNAME, "password": "nope" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Invalid username or password");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_username(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/auth/login",
            &json!({ "username": "someone-else", "password": TEST_PASSWORD }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_token_for_protected_routes(ctx: &TestContext) {
    let response = ctx.client.get("/api/languages").await.unwrap();
    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Missing authorization header");

    let response = ctx
        .client
        .post("/api/audio/generate", &json!({}))
        .await
        .unwrap();
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = ctx
        .client
        .post("/api/phrases/batch", &json!({}))
        .await
        .unwrap();
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_token(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_auth("/api/languages", "not-a-jwt")
        .await
        .unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_token_signed_with_another_secret(ctx: &TestContext) {
    let foreign = superlearning_backend::domain::auth::JwtManager::new("other-secret".to_string(), 1)
        .generate_token(TEST_USERNAME)
        .unwrap();

    let response = ctx.client.get_with_auth("/api/languages", &foreign).await.unwrap();
    response.assert_status(StatusCode::UNAUTHORIZED);

    // The context token is accepted
    let response = ctx.client.get_with_auth("/api/languages", &ctx.token).await.unwrap();
    response.assert_status(StatusCode::OK);
}
