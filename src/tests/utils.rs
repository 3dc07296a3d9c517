// src/tests/utils.rs
use astra::{Body, Request, Response};
use http::Method;
use serde_json::Value;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Config;
use crate::db::{init_db, Database};
use crate::domain::{ListingKind, NewListing};
use crate::router::{handle, App};

/// Fresh app over a throwaway file database using the production schema.
pub fn make_app() -> App {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("ndola_test_{nanos}.sqlite"));
    let db = Database::new(path.to_string_lossy().into_owned());

    init_db(&db, "sql/schema.sql").expect("database initialization failed");

    App {
        db,
        config: Config {
            port: 0,
            db_file: path.to_string_lossy().into_owned(),
            site_name: "Ndola Homes".to_string(),
            mailer: None,
        },
        mailer: None,
    }
}

pub fn get(path: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = path.parse().unwrap();
    req
}

pub fn post_json(path: &str, body: Value) -> Request {
    let mut req = Request::new(Body::from(body.to_string()));
    *req.method_mut() = Method::POST;
    *req.uri_mut() = path.parse().unwrap();
    req.headers_mut()
        .insert("Content-Type", "application/json".parse().unwrap());
    req
}

pub fn with_bearer(mut req: Request, token: &str) -> Request {
    req.headers_mut()
        .insert("Authorization", format!("Bearer {token}").parse().unwrap());
    req
}

pub fn body_json(resp: Response) -> Value {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    serde_json::from_str(&body).unwrap()
}

/// Register a user through the API and hand back their bearer token.
pub fn register_user(app: &App, email: &str, role: &str) -> String {
    let req = post_json(
        "/api/auth/register",
        serde_json::json!({
            "name": "Test Person",
            "email": email,
            "password": "secret123",
            "role": role,
        }),
    );
    let resp = handle(req, app).unwrap();
    assert_eq!(resp.status(), 201);
    body_json(resp)["token"].as_str().unwrap().to_string()
}

pub fn new_listing(title: &str, price: i64, kind: ListingKind) -> NewListing {
    NewListing {
        title: title.to_string(),
        description: format!("{title} description text"),
        price,
        kind,
        bedrooms: None,
        bathrooms: None,
        city: "Ndola".to_string(),
        area: None,
        address: None,
        owner_name: None,
        owner_email: None,
        owner_phone: None,
        latitude: None,
        longitude: None,
        thumbnail_url: None,
        source: None,
        source_url: None,
        scraped_at: None,
    }
}
