// src/validate.rs
//
// The validation boundary in front of the query engine and the write
// endpoints: parses and range-checks raw query parameters and JSON bodies,
// rejecting bad input with every failing field listed. The engine itself
// assumes inputs that pass here.

use serde::Deserialize;
use std::collections::HashMap;

use crate::domain::{ListingKind, ListingQuery, MediaKind, NewMedia};
use crate::errors::{FieldError, ServerError};

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;
pub const MAX_MEDIA_PER_LISTING: usize = 10;

const MIN_RADIUS_KM: f64 = 0.5;
const MAX_RADIUS_KM: f64 = 500.0;

/// Collects field errors so one response can report all of them.
#[derive(Default)]
struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn into_result<T>(self, value: T) -> Result<T, ServerError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ServerError::Validation(self.errors))
        }
    }
}

fn parse_i64(
    params: &HashMap<String, String>,
    field: &'static str,
    min: i64,
    errors: &mut FieldErrors,
) -> Option<i64> {
    let raw = params.get(field)?;
    match raw.parse::<i64>() {
        Ok(v) if v >= min => Some(v),
        Ok(_) => {
            errors.push(field, format!("must be at least {min}"));
            None
        }
        Err(_) => {
            errors.push(field, "must be an integer");
            None
        }
    }
}

fn parse_f64_range(
    params: &HashMap<String, String>,
    field: &'static str,
    min: f64,
    max: f64,
    errors: &mut FieldErrors,
) -> Option<f64> {
    let raw = params.get(field)?;
    match raw.parse::<f64>() {
        Ok(v) if v >= min && v <= max => Some(v),
        Ok(_) => {
            errors.push(field, format!("must be between {min} and {max}"));
            None
        }
        Err(_) => {
            errors.push(field, "must be a number");
            None
        }
    }
}

/// Minimal email sanity check, same spirit as the rest of the stack:
/// trimmed, lowercased, an '@' somewhere in the middle.
pub fn normalize_email(email: &str) -> Option<String> {
    let e = email.trim().to_lowercase();
    if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
        return None;
    }
    Some(e)
}

/// Parse `/api/listings` query parameters into a ListingQuery.
/// Every failing parameter is reported; nothing malformed reaches the
/// engine. An incomplete geo triple is NOT an error here (the engine
/// skips it), but out-of-range geo values are.
pub fn parse_listing_query(params: &HashMap<String, String>) -> Result<ListingQuery, ServerError> {
    let mut errors = FieldErrors::default();
    let mut query = ListingQuery::default();

    query.term = params
        .get("q")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    if let Some(raw) = params.get("kind") {
        match ListingKind::parse(raw) {
            Some(kind) => query.kind = Some(kind),
            None => errors.push("kind", "must be one of: sale, rent"),
        }
    }

    query.min_price = parse_i64(params, "minPrice", 0, &mut errors);
    query.max_price = parse_i64(params, "maxPrice", 0, &mut errors);
    query.min_bedrooms = parse_i64(params, "bedrooms", 0, &mut errors);

    query.city = params
        .get("city")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    query.latitude = parse_f64_range(params, "latitude", -90.0, 90.0, &mut errors);
    query.longitude = parse_f64_range(params, "longitude", -180.0, 180.0, &mut errors);
    query.radius_km = parse_f64_range(params, "radiusKm", MIN_RADIUS_KM, MAX_RADIUS_KM, &mut errors);

    if let Some(limit) = parse_i64(params, "limit", 1, &mut errors) {
        if limit > MAX_LIMIT {
            errors.push("limit", format!("must be between 1 and {MAX_LIMIT}"));
        } else {
            query.limit = limit;
        }
    }
    if let Some(offset) = parse_i64(params, "offset", 0, &mut errors) {
        query.offset = offset;
    }

    errors.into_result(query)
}

// ---------------------------------------------------------------------------
// JSON bodies. Raw string fields here; validation converts to domain enums
// so a bad value is a field error, not an opaque deserialization failure.
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    #[serde(rename = "listingId")]
    pub listing_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MediaPayload {
    pub url: String,
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct PublishPayload {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub kind: String,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub city: String,
    pub area: Option<String>,
    pub address: Option<String>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub owner_phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub media: Vec<MediaPayload>,
}

#[derive(Debug)]
pub struct ValidRegistration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<crate::db::users::Role>,
}

pub fn validate_registration(payload: RegisterPayload) -> Result<ValidRegistration, ServerError> {
    let mut errors = FieldErrors::default();

    let name = payload.name.trim().to_string();
    if name.chars().count() < 2 {
        errors.push("name", "must be at least 2 characters");
    }

    let email = match normalize_email(&payload.email) {
        Some(e) => e,
        None => {
            errors.push("email", "must be a valid email address");
            String::new()
        }
    };

    if payload.password.chars().count() < 6 {
        errors.push("password", "must be at least 6 characters");
    }

    let role = match payload.role.as_deref() {
        None => None,
        Some(raw) => match crate::db::users::Role::parse(raw) {
            Some(role) => Some(role),
            None => {
                errors.push("role", "must be one of: user, agent, admin");
                None
            }
        },
    };

    errors.into_result(ValidRegistration {
        name,
        email,
        password: payload.password,
        role,
    })
}

pub struct ValidLogin {
    pub email: String,
    pub password: String,
}

pub fn validate_login(payload: LoginPayload) -> Result<ValidLogin, ServerError> {
    let mut errors = FieldErrors::default();

    let email = match normalize_email(&payload.email) {
        Some(e) => e,
        None => {
            errors.push("email", "must be a valid email address");
            String::new()
        }
    };
    if payload.password.chars().count() < 6 {
        errors.push("password", "must be at least 6 characters");
    }

    errors.into_result(ValidLogin {
        email,
        password: payload.password,
    })
}

pub fn validate_contact(
    payload: ContactPayload,
) -> Result<crate::db::contacts::ContactMessage, ServerError> {
    let mut errors = FieldErrors::default();

    let name = payload.name.trim().to_string();
    if name.chars().count() < 2 {
        errors.push("name", "must be at least 2 characters");
    }

    let email = match normalize_email(&payload.email) {
        Some(e) => e,
        None => {
            errors.push("email", "must be a valid email address");
            String::new()
        }
    };

    if payload.message.trim().chars().count() < 5 {
        errors.push("message", "must be at least 5 characters");
    }

    if let Some(id) = payload.listing_id {
        if id < 1 {
            errors.push("listingId", "must be a positive id");
        }
    }

    errors.into_result(crate::db::contacts::ContactMessage {
        listing_id: payload.listing_id,
        name,
        email,
        phone: payload.phone.filter(|p| !p.trim().is_empty()),
        message: payload.message,
    })
}

#[derive(Debug)]
pub struct ValidPublish {
    pub listing: crate::domain::NewListing,
    pub media: Vec<NewMedia>,
}

pub fn validate_publish(payload: PublishPayload) -> Result<ValidPublish, ServerError> {
    let mut errors = FieldErrors::default();

    if payload.title.trim().chars().count() < 3 {
        errors.push("title", "must be at least 3 characters");
    }
    if payload.description.trim().chars().count() < 10 {
        errors.push("description", "must be at least 10 characters");
    }
    if payload.price < 0 {
        errors.push("price", "must be at least 0");
    }

    let kind = match ListingKind::parse(&payload.kind) {
        Some(kind) => kind,
        None => {
            errors.push("kind", "must be one of: sale, rent");
            ListingKind::Sale
        }
    };

    if payload.bedrooms.is_some_and(|b| b < 0) {
        errors.push("bedrooms", "must be at least 0");
    }
    if payload.bathrooms.is_some_and(|b| b < 0) {
        errors.push("bathrooms", "must be at least 0");
    }
    if payload.city.trim().chars().count() < 2 {
        errors.push("city", "must be at least 2 characters");
    }
    if let Some(owner_email) = payload.owner_email.as_deref() {
        if normalize_email(owner_email).is_none() {
            errors.push("owner_email", "must be a valid email address");
        }
    }

    // Coordinates are only usable as a pair; publishing half of one is a
    // caller mistake rather than something to silently store.
    match (payload.latitude, payload.longitude) {
        (Some(lat), _) if !(-90.0..=90.0).contains(&lat) => {
            errors.push("latitude", "must be between -90 and 90");
        }
        _ => {}
    }
    match (payload.latitude, payload.longitude) {
        (_, Some(lon)) if !(-180.0..=180.0).contains(&lon) => {
            errors.push("longitude", "must be between -180 and 180");
        }
        _ => {}
    }
    match (payload.latitude, payload.longitude) {
        (Some(_), None) => errors.push("longitude", "required when latitude is set"),
        (None, Some(_)) => errors.push("latitude", "required when longitude is set"),
        _ => {}
    }

    if payload.media.len() > MAX_MEDIA_PER_LISTING {
        errors.push(
            "media",
            format!("at most {MAX_MEDIA_PER_LISTING} entries allowed"),
        );
    }
    let mut media = Vec::with_capacity(payload.media.len());
    for item in &payload.media {
        if item.url.trim().is_empty() {
            errors.push("media", "every entry needs a url");
            continue;
        }
        match MediaKind::parse(&item.kind) {
            Some(kind) => media.push(NewMedia {
                url: item.url.clone(),
                kind,
            }),
            None => errors.push("media", "kind must be one of: image, video"),
        }
    }

    let thumbnail_url = media.first().map(|m| m.url.clone());

    let listing = crate::domain::NewListing {
        title: payload.title.trim().to_string(),
        description: payload.description.trim().to_string(),
        price: payload.price,
        kind,
        bedrooms: payload.bedrooms,
        bathrooms: payload.bathrooms,
        city: payload.city.trim().to_string(),
        area: payload.area.filter(|s| !s.trim().is_empty()),
        address: payload.address.filter(|s| !s.trim().is_empty()),
        owner_name: payload.owner_name.filter(|s| !s.trim().is_empty()),
        owner_email: payload.owner_email.filter(|s| !s.trim().is_empty()),
        owner_phone: payload.owner_phone.filter(|s| !s.trim().is_empty()),
        latitude: payload.latitude,
        longitude: payload.longitude,
        thumbnail_url,
        source: None,
        source_url: None,
        scraped_at: None,
    };

    errors.into_result(ValidPublish { listing, media })
}
