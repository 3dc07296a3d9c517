// src/tests/router_tests/publish_tests.rs
use serde_json::{json, Value};

use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::{body_json, get, make_app, post_json, register_user, with_bearer};

fn house_payload() -> Value {
    json!({
        "title": "Family House with Garden",
        "description": "Beautiful 4-bedroom house with a large garden in Kansenshi.",
        "price": 1800000,
        "kind": "sale",
        "bedrooms": 4,
        "bathrooms": 3,
        "city": "Ndola",
        "area": "Kansenshi",
        "address": "Plot 1234, Kansenshi",
        "latitude": -12.99,
        "longitude": 28.65,
        "media": [
            { "url": "/public/uploads/front.jpg", "kind": "image" },
            { "url": "/public/uploads/tour.mp4", "kind": "video" }
        ]
    })
}

#[test]
fn publishing_requires_a_token() {
    let app = make_app();
    let err = handle(post_json("/api/listings", house_payload()), &app).unwrap_err();

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 401);
    assert_eq!(body_json(resp)["error"], "unauthorized");
}

#[test]
fn plain_users_may_not_publish() {
    let app = make_app();
    let token = register_user(&app, "user@example.com", "user");

    let err = handle(
        with_bearer(post_json("/api/listings", house_payload()), &token),
        &app,
    )
    .unwrap_err();

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 403);
    assert_eq!(body_json(resp)["error"], "forbidden");
}

#[test]
fn agents_publish_and_the_listing_is_searchable() {
    let app = make_app();
    let token = register_user(&app, "agent@example.com", "agent");

    let resp = handle(
        with_bearer(post_json("/api/listings", house_payload()), &token),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 201);
    let id = body_json(resp)["id"].as_i64().unwrap();

    // Single fetch carries media and the derived thumbnail.
    let body = body_json(handle(get(&format!("/api/listings/{id}")), &app).unwrap());
    assert_eq!(body["media"].as_array().unwrap().len(), 2);
    assert_eq!(body["thumbnail_url"], "/public/uploads/front.jpg");

    // And the search surface sees it with every filter satisfied.
    let found = body_json(
        handle(
            get("/api/listings?kind=sale&city=ndola&bedrooms=4&minPrice=1000000"),
            &app,
        )
        .unwrap(),
    );
    assert_eq!(found["total"], 1);
    assert_eq!(found["items"][0]["id"], id);
}

#[test]
fn admins_may_publish_too() {
    let app = make_app();
    let token = register_user(&app, "admin@example.com", "admin");

    let resp = handle(
        with_bearer(post_json("/api/listings", house_payload()), &token),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 201);
}

#[test]
fn half_a_coordinate_is_rejected() {
    let app = make_app();
    let token = register_user(&app, "agent2@example.com", "agent");

    let mut payload = house_payload();
    payload.as_object_mut().unwrap().remove("longitude");

    let err = handle(
        with_bearer(post_json("/api/listings", payload), &token),
        &app,
    )
    .unwrap_err();

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["errors"][0]["field"], "longitude");
}

#[test]
fn short_title_is_rejected() {
    let app = make_app();
    let token = register_user(&app, "agent3@example.com", "agent");

    let mut payload = house_payload();
    payload["title"] = json!("ab");

    let err = handle(
        with_bearer(post_json("/api/listings", payload), &token),
        &app,
    )
    .unwrap_err();
    assert_eq!(error_to_response(err).status(), 400);
}
