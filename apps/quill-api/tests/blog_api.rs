//! Black-box tests for the blog API, driven over the real route table with
//! in-memory repositories.

use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use quill_api::handlers;
use quill_api::state::AppState;
use quill_core::ports::{PasswordService, TokenService};
use quill_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

fn token_service() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "integration-test-secret".to_string(),
        expiration_hours: 1,
        issuer: "quill-test".to_string(),
    }))
}

fn password_service() -> Arc<dyn PasswordService> {
    Arc::new(Argon2PasswordService::new())
}

macro_rules! test_app {
    ($state:expr, $tokens:expr) => {
        test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .app_data(web::Data::new($state.clone()))
                .app_data(web::Data::new($tokens.clone()))
                .app_data(web::Data::new(password_service()))
                .configure(handlers::configure_routes),
        )
        .await
    };
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! create_blog {
    ($app:expr, $token:expr, $title:expr, $description:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/blog")
            .insert_header(bearer($token))
            .set_json(json!({ "title": $title, "description": $description }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body
    }};
}

#[actix_web::test]
async fn test_missing_token_is_unauthorized() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);

    let req = test::TestRequest::get().uri("/api/blog").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_list_starts_empty() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let token = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/blog")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Operation success");
    assert_eq!(body["data"], json!([]));
}

#[actix_web::test]
async fn test_create_then_detail_round_trip() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let u1 = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();
    let u2 = tokens
        .generate_token(Uuid::new_v4(), "u2@example.com")
        .unwrap();

    let created = create_blog!(app, &u1, "Hello", "World");
    assert_eq!(created["success"], true);
    assert_eq!(created["message"], "Blog add Success.");
    assert_eq!(created["data"]["title"], "Hello");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // Any authenticated user may read it
    let req = test::TestRequest::get()
        .uri(&format!("/api/blog/{id}"))
        .insert_header(bearer(&u2))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["title"], "Hello");
    assert_eq!(body["data"]["description"], "World");
    assert!(body["data"]["created_at"].is_string());
    // The projection never leaks the owner id
    assert!(body["data"].get("user_id").is_none());
}

#[actix_web::test]
async fn test_create_empty_title_is_validation_error_and_writes_nothing() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let token = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/api/blog")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "   ", "description": "World" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Validation Error.");
    assert_eq!(body["errors"][0]["param"], "title");
    assert_eq!(body["errors"][0]["msg"], "Title must not be empty.");

    // Zero persistence writes occurred
    let req = test::TestRequest::get()
        .uri("/api/blog")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!([]));
}

#[actix_web::test]
async fn test_create_without_fields_is_validation_error() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let token = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();

    // An empty body gets the field-error envelope, not a deserialize error
    let req = test::TestRequest::post()
        .uri("/api/blog")
        .insert_header(bearer(&token))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Validation Error.");
    assert_eq!(body["errors"][0]["param"], "title");
    assert_eq!(body["errors"][1]["param"], "description");
}

#[actix_web::test]
async fn test_update_with_partial_body_reports_missing_field() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let token = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();

    let created = create_blog!(app, &token, "Hello", "World");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/blog/{id}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Hi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Validation Error.");
    assert_eq!(body["errors"][0]["param"], "description");
}

#[actix_web::test]
async fn test_trailing_slash_reaches_the_same_route() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let token = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/blog/")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
}

#[actix_web::test]
async fn test_detail_collapses_malformed_and_missing_ids_to_empty_object() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let token = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();

    for path in [
        "/api/blog/not-a-uuid".to_string(),
        format!("/api/blog/{}", Uuid::new_v4()),
    ] {
        let req = test::TestRequest::get()
            .uri(&path)
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], json!({}));
    }
}

#[actix_web::test]
async fn test_update_and_delete_report_malformed_id_as_invalid_id() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let token = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();

    let req = test::TestRequest::put()
        .uri("/api/blog/not-a-uuid")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Hi", "description": "There" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid Error.");
    assert_eq!(body["errors"], "Invalid ID");

    let req = test::TestRequest::delete()
        .uri("/api/blog/not-a-uuid")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid Error.");
    assert_eq!(body["errors"], "Invalid ID");
}

#[actix_web::test]
async fn test_update_field_validation_runs_before_id_check() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let token = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();

    // Malformed id AND empty fields: the field-error envelope wins
    let req = test::TestRequest::put()
        .uri("/api/blog/not-a-uuid")
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "", "description": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Validation Error.");
    assert_eq!(body["errors"][0]["param"], "title");
    assert_eq!(body["errors"][1]["param"], "description");
}

#[actix_web::test]
async fn test_update_and_delete_missing_record_is_not_found() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let token = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();
    let missing = Uuid::new_v4();

    let req = test::TestRequest::put()
        .uri(&format!("/api/blog/{missing}"))
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Hi", "description": "There" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Blog not exists with this id");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/blog/{missing}"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Blog not exists with this id");
}

#[actix_web::test]
async fn test_non_owner_cannot_update_or_delete() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let u1 = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();
    let u2 = tokens
        .generate_token(Uuid::new_v4(), "u2@example.com")
        .unwrap();

    let created = create_blog!(app, &u1, "Hello", "World");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/blog/{id}"))
        .insert_header(bearer(&u2))
        .set_json(json!({ "title": "Hi", "description": "There" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "You are not authorized to do this operation.");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/blog/{id}"))
        .insert_header(bearer(&u2))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // Record is unchanged
    let req = test::TestRequest::get()
        .uri(&format!("/api/blog/{id}"))
        .insert_header(bearer(&u1))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Hello");
}

#[actix_web::test]
async fn test_owner_update_is_persisted() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let u1 = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();

    let created = create_blog!(app, &u1, "Hello", "World");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/blog/{id}"))
        .insert_header(bearer(&u1))
        .set_json(json!({ "title": "Hi", "description": "There" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Blog update Success.");
    assert_eq!(body["data"]["title"], "Hi");
    assert_eq!(body["data"]["id"], id.as_str());

    let req = test::TestRequest::get()
        .uri(&format!("/api/blog/{id}"))
        .insert_header(bearer(&u1))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Hi");
    assert_eq!(body["data"]["description"], "There");
}

#[actix_web::test]
async fn test_full_lifecycle_scenario() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let u1 = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();
    let u2 = tokens
        .generate_token(Uuid::new_v4(), "u2@example.com")
        .unwrap();

    // Create as U1
    let created = create_blog!(app, &u1, "Hello", "World");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    // Detail as any authenticated user
    let req = test::TestRequest::get()
        .uri(&format!("/api/blog/{id}"))
        .insert_header(bearer(&u2))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Hello");
    assert_eq!(body["data"]["description"], "World");

    // Update as U2 is rejected and leaves the record untouched
    let req = test::TestRequest::put()
        .uri(&format!("/api/blog/{id}"))
        .insert_header(bearer(&u2))
        .set_json(json!({ "title": "Hi", "description": "World" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri(&format!("/api/blog/{id}"))
        .insert_header(bearer(&u1))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Hello");

    // Delete as U1 succeeds, with no data payload
    let req = test::TestRequest::delete()
        .uri(&format!("/api/blog/{id}"))
        .insert_header(bearer(&u1))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Blog delete Success.");
    assert!(body.get("data").is_none());

    // Detail now collapses to the empty object, not a 404
    let req = test::TestRequest::get()
        .uri(&format!("/api/blog/{id}"))
        .insert_header(bearer(&u1))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], json!({}));
}

#[actix_web::test]
async fn test_list_is_newest_first() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let token = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();

    for title in ["A", "B", "C"] {
        create_blog!(app, &token, title, "body");
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let req = test::TestRequest::get()
        .uri("/api/blog")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["C", "B", "A"]);
}

#[actix_web::test]
async fn test_markup_is_escaped_before_storage() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);
    let token = tokens
        .generate_token(Uuid::new_v4(), "u1@example.com")
        .unwrap();

    let created = create_blog!(app, &token, "<b>Hi</b>", "a & b");

    assert_eq!(created["data"]["title"], "&lt;b&gt;Hi&lt;&#x2F;b&gt;");
    assert_eq!(created["data"]["description"], "a &amp; b");
}

#[actix_web::test]
async fn test_register_login_and_use_token() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);

    // Register
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "u1@example.com", "password": "secure-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"].as_str().unwrap().to_string();

    // The issued token authorizes blog operations
    let created = create_blog!(app, &token, "Hello", "World");
    assert_eq!(created["success"], true);

    // Login with the same credentials
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "u1@example.com", "password": "secure-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Duplicate registration is a conflict
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "u1@example.com", "password": "secure-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn test_login_wrong_password_is_unauthorized() {
    let (state, tokens) = (AppState::in_memory(), token_service());
    let app = test_app!(state, tokens);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "u1@example.com", "password": "secure-password" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "u1@example.com", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}
