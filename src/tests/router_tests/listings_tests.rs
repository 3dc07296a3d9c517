// src/tests/router_tests/listings_tests.rs
use crate::db::listings;
use crate::domain::{ListingKind, MediaKind, NewMedia};
use crate::router::handle;
use crate::tests::utils::{body_json, get, make_app, new_listing};

/// The two listings every test here starts from: A (sale, 450000, 3br) and
/// B (rent, 2500, 2br), both in Ndola.
fn seed_a_and_b(app: &crate::router::App) -> (i64, i64) {
    let mut a = new_listing("Modern 3-Bedroom House in Northrise", 450_000, ListingKind::Sale);
    a.bedrooms = Some(3);
    let mut b = new_listing("Cozy 2-Bedroom Apartment", 2_500, ListingKind::Rent);
    b.bedrooms = Some(2);

    let a_id = listings::insert(&app.db, &a, &[]).unwrap();
    let b_id = listings::insert(&app.db, &b, &[]).unwrap();
    (a_id, b_id)
}

#[test]
fn health_reports_the_site_name() {
    let app = make_app();
    let resp = handle(get("/api/health"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["site"], "Ndola Homes");
}

#[test]
fn search_without_filters_returns_everything() {
    let app = make_app();
    seed_a_and_b(&app);

    let resp = handle(get("/api/listings"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["total"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    // Every item carries a media array, even when empty.
    assert!(body["items"][0]["media"].as_array().unwrap().is_empty());
}

#[test]
fn kind_filter_narrows_to_rentals() {
    let app = make_app();
    let (_, b_id) = seed_a_and_b(&app);

    let body = body_json(handle(get("/api/listings?kind=rent"), &app).unwrap());
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], b_id);
    assert_eq!(body["items"][0]["kind"], "rent");
}

#[test]
fn min_price_filter_keeps_the_expensive_one() {
    let app = make_app();
    let (a_id, _) = seed_a_and_b(&app);

    let body = body_json(handle(get("/api/listings?minPrice=100000"), &app).unwrap());
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], a_id);
}

#[test]
fn city_filter_ignores_case() {
    let app = make_app();
    seed_a_and_b(&app);

    let body = body_json(handle(get("/api/listings?city=NDOLA"), &app).unwrap());
    assert_eq!(body["total"], 2);
}

#[test]
fn bedrooms_filter_means_at_least() {
    let app = make_app();
    let (a_id, _) = seed_a_and_b(&app);

    let body = body_json(handle(get("/api/listings?bedrooms=3"), &app).unwrap());
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["id"], a_id);
}

#[test]
fn lat_lon_without_radius_changes_nothing() {
    let app = make_app();
    seed_a_and_b(&app);

    let plain = body_json(handle(get("/api/listings"), &app).unwrap());
    let partial = body_json(
        handle(get("/api/listings?latitude=-12.96&longitude=28.63"), &app).unwrap(),
    );
    assert_eq!(plain["total"], partial["total"]);
    assert_eq!(plain["items"], partial["items"]);
}

#[test]
fn bad_parameters_report_each_failing_field() {
    let app = make_app();

    let resp = handle(get("/api/listings?kind=lease&limit=500&latitude=200"), &app);
    let err = resp.unwrap_err();
    let resp = crate::responses::error_to_response(err);
    assert_eq!(resp.status(), 400);

    let body = body_json(resp);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"kind"));
    assert!(fields.contains(&"limit"));
    assert!(fields.contains(&"latitude"));
}

#[test]
fn pagination_windows_the_ordered_results() {
    let app = make_app();
    for i in 0..5 {
        listings::insert(
            &app.db,
            &new_listing(&format!("House {i}"), 1000 + i, ListingKind::Sale),
            &[],
        )
        .unwrap();
    }

    let body = body_json(handle(get("/api/listings?limit=2&offset=1"), &app).unwrap());
    assert_eq!(body["total"], 5);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "House 3");
}

#[test]
fn single_listing_comes_back_with_media() {
    let app = make_app();
    let media = vec![NewMedia {
        url: "/public/uploads/front.jpg".to_string(),
        kind: MediaKind::Image,
    }];
    let id = listings::insert(
        &app.db,
        &new_listing("House With Photo", 90_000, ListingKind::Sale),
        &media,
    )
    .unwrap();

    let resp = handle(get(&format!("/api/listings/{id}")), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["title"], "House With Photo");
    assert_eq!(body["media"][0]["url"], "/public/uploads/front.jpg");
    assert_eq!(body["media"][0]["kind"], "image");
}

#[test]
fn unknown_listing_id_is_not_found() {
    let app = make_app();

    let err = handle(get("/api/listings/999"), &app).unwrap_err();
    assert_eq!(crate::responses::error_to_response(err).status(), 404);

    let err = handle(get("/api/listings/not-a-number"), &app).unwrap_err();
    assert_eq!(crate::responses::error_to_response(err).status(), 404);
}

#[test]
fn unknown_route_is_not_found() {
    let app = make_app();
    let err = handle(get("/api/nope"), &app).unwrap_err();
    assert_eq!(crate::responses::error_to_response(err).status(), 404);
}

#[test]
fn home_page_renders_html() {
    let app = make_app();
    let resp = handle(get("/"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let mut body = String::new();
    use std::io::Read;
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    assert!(body.contains("Ndola Homes"));
    assert!(body.contains("/api/listings"));
}
