// src/tests/router_tests/contact_tests.rs
use serde_json::json;

use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::{body_json, make_app, post_json};

#[test]
fn contact_is_stored_even_without_a_mailer() {
    let app = make_app();

    let resp = handle(
        post_json(
            "/api/contact",
            json!({
                "name": "Jane Phiri",
                "email": "jane@example.com",
                "phone": "+260971234567",
                "message": "Is the Kansenshi house still available?"
            }),
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 201);

    let id = body_json(resp)["id"].as_i64().unwrap();
    let (name, message): (String, String) = app
        .db
        .with_conn(|conn| {
            conn.query_row(
                "select name, message from contacts where id = ?",
                rusqlite::params![id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .map_err(|e| ServerError::DbError(e.to_string()))
        })
        .unwrap();
    assert_eq!(name, "Jane Phiri");
    assert!(message.contains("Kansenshi"));
}

#[test]
fn contact_can_reference_a_listing() {
    let app = make_app();

    let resp = handle(
        post_json(
            "/api/contact",
            json!({
                "name": "Jane Phiri",
                "email": "jane@example.com",
                "message": "Please call me about this one.",
                "listingId": 42
            }),
        ),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 201);

    let id = body_json(resp)["id"].as_i64().unwrap();
    let listing_id: Option<i64> = app
        .db
        .with_conn(|conn| {
            conn.query_row(
                "select listing_id from contacts where id = ?",
                rusqlite::params![id],
                |r| r.get(0),
            )
            .map_err(|e| ServerError::DbError(e.to_string()))
        })
        .unwrap();
    assert_eq!(listing_id, Some(42));
}

#[test]
fn short_message_is_rejected_with_the_field_named() {
    let app = make_app();

    let err = handle(
        post_json(
            "/api/contact",
            json!({ "name": "Jane", "email": "jane@example.com", "message": "hi" }),
        ),
        &app,
    )
    .unwrap_err();

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["errors"][0]["field"], "message");
}

#[test]
fn non_json_body_is_a_bad_request() {
    let app = make_app();

    let mut req = post_json("/api/contact", json!({}));
    *req.body_mut() = astra::Body::from("this is not json".to_string());

    let err = handle(req, &app).unwrap_err();
    assert_eq!(error_to_response(err).status(), 400);
}
