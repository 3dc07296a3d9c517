// src/tests/router_tests/auth_tests.rs
use serde_json::json;

use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::{body_json, get, make_app, post_json, with_bearer};

#[test]
fn register_then_me_round_trip() {
    let app = make_app();

    let resp = handle(
        post_json(
            "/api/auth/register",
            json!({ "name": "Mary Banda", "email": "Mary@Example.com", "password": "secret123" }),
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 201);

    let body = body_json(resp);
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["email"], "mary@example.com"); // normalized
    assert_eq!(body["user"]["role"], "user");

    let resp = handle(with_bearer(get("/api/auth/me"), &token), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["user"]["name"], "Mary Banda");
}

#[test]
fn login_returns_a_fresh_token() {
    let app = make_app();
    handle(
        post_json(
            "/api/auth/register",
            json!({ "name": "John", "email": "john@example.com", "password": "secret123" }),
        ),
        &app,
    )
    .unwrap();

    let resp = handle(
        post_json(
            "/api/auth/login",
            json!({ "email": "john@example.com", "password": "secret123" }),
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let token = body_json(resp)["token"].as_str().unwrap().to_string();
    let me = handle(with_bearer(get("/api/auth/me"), &token), &app).unwrap();
    assert_eq!(body_json(me)["user"]["email"], "john@example.com");
}

#[test]
fn wrong_password_is_invalid_credentials() {
    let app = make_app();
    handle(
        post_json(
            "/api/auth/register",
            json!({ "name": "John", "email": "john@example.com", "password": "secret123" }),
        ),
        &app,
    )
    .unwrap();

    let err = handle(
        post_json(
            "/api/auth/login",
            json!({ "email": "john@example.com", "password": "wrong-pass" }),
        ),
        &app,
    )
    .unwrap_err();

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 401);
    assert_eq!(body_json(resp)["error"], "invalid_credentials");
}

#[test]
fn unknown_email_is_also_invalid_credentials() {
    let app = make_app();
    let err = handle(
        post_json(
            "/api/auth/login",
            json!({ "email": "ghost@example.com", "password": "secret123" }),
        ),
        &app,
    )
    .unwrap_err();
    assert_eq!(error_to_response(err).status(), 401);
}

#[test]
fn duplicate_email_conflicts() {
    let app = make_app();
    let payload = json!({ "name": "John", "email": "dup@example.com", "password": "secret123" });

    handle(post_json("/api/auth/register", payload.clone()), &app).unwrap();
    let err = handle(post_json("/api/auth/register", payload), &app).unwrap_err();

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 409);
    assert_eq!(body_json(resp)["error"], "email_in_use");
}

#[test]
fn bad_registration_lists_the_fields() {
    let app = make_app();
    let err = handle(
        post_json(
            "/api/auth/register",
            json!({ "name": "J", "email": "nope", "password": "123" }),
        ),
        &app,
    )
    .unwrap_err();

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["errors"].as_array().unwrap().len(), 3);
}

#[test]
fn me_without_token_is_unauthorized() {
    let app = make_app();
    let err = handle(get("/api/auth/me"), &app).unwrap_err();

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 401);
    assert_eq!(body_json(resp)["error"], "unauthorized");
}

#[test]
fn me_with_garbage_token_is_invalid_token() {
    let app = make_app();
    let err = handle(with_bearer(get("/api/auth/me"), "garbage"), &app).unwrap_err();

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 401);
    assert_eq!(body_json(resp)["error"], "invalid_token");
}
