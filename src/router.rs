// src/router.rs
use astra::Request;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info, warn};

use crate::auth::{password, sessions};
use crate::config::Config;
use crate::db::users::{Role, User};
use crate::db::{contacts, listings, users, Database};
use crate::errors::ServerError;
use crate::mailer::ContactMailer;
use crate::responses::{html_response, json_response, json_response_with_status, ResultResp};
use crate::templates;
use crate::validate;

// Request bodies are small JSON documents; anything bigger is rejected.
const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Everything a request handler needs: the listing store, configuration,
/// and the (optional) contact relay. Injected rather than global so tests
/// can run against fixture stores.
pub struct App {
    pub db: Database,
    pub config: Config,
    pub mailer: Option<ContactMailer>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let db = Database::new(config.db_file.clone());
        let mailer = config.mailer.clone().map(ContactMailer::new);
        Self { db, config, mailer }
    }
}

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(templates::home_page(&app.config.site_name)),
        ("GET", "/admin") => html_response(templates::admin_page(&app.config.site_name)),
        ("GET", "/privacy") => html_response(templates::privacy_page(&app.config.site_name)),
        ("GET", "/terms") => html_response(templates::terms_page(&app.config.site_name)),

        ("GET", "/api/health") => health(app),
        ("GET", "/api/listings") => search_listings(&req, app),
        ("POST", "/api/listings") => publish_listing(&mut req, app),
        ("POST", "/api/contact") => submit_contact(&mut req, app),
        ("POST", "/api/auth/register") => register(&mut req, app),
        ("POST", "/api/auth/login") => login(&mut req, app),
        ("GET", "/api/auth/me") => me(&req, app),

        ("GET", p) if p.starts_with("/api/listings/") => get_listing(p, app),

        _ => Err(ServerError::NotFound),
    }
}

fn health(app: &App) -> ResultResp {
    json_response(&json!({ "status": "ok", "site": app.config.site_name }))
}

fn search_listings(req: &Request, app: &App) -> ResultResp {
    let params = parse_query(req);
    let query = validate::parse_listing_query(&params)?;
    let page = listings::search(&app.db, &query)?;
    json_response(&page)
}

fn get_listing(path: &str, app: &App) -> ResultResp {
    let id: i64 = path
        .trim_start_matches("/api/listings/")
        .parse()
        .map_err(|_| ServerError::NotFound)?;

    match listings::get_with_media(&app.db, id)? {
        Some(listing) => json_response(&listing),
        None => Err(ServerError::NotFound),
    }
}

fn publish_listing(req: &mut Request, app: &App) -> ResultResp {
    let user = current_user(req, app)?;
    if !user.role.can_publish() {
        return Err(ServerError::Forbidden);
    }

    let payload: validate::PublishPayload = read_json_body(req)?;
    let valid = validate::validate_publish(payload)?;

    let id = listings::insert(&app.db, &valid.listing, &valid.media)?;
    info!(listing_id = id, agent = %user.email, "listing published");

    json_response_with_status(201, &json!({ "id": id }))
}

fn submit_contact(req: &mut Request, app: &App) -> ResultResp {
    let payload: validate::ContactPayload = read_json_body(req)?;
    let message = validate::validate_contact(payload)?;

    let id = app
        .db
        .with_conn(|conn| contacts::insert_contact(conn, &message))?;

    // Relay is best-effort: the submission is already stored, so a mail
    // failure must not fail the request.
    match &app.mailer {
        Some(mailer) => {
            if let Err(e) = mailer.send_contact_notification(&app.config.site_name, &message) {
                error!("contact relay failed: {e}");
            } else {
                info!(contact_id = id, "contact email sent");
            }
        }
        None => warn!("email credentials not configured, skipping contact relay"),
    }

    json_response_with_status(201, &json!({ "id": id }))
}

fn register(req: &mut Request, app: &App) -> ResultResp {
    let payload: validate::RegisterPayload = read_json_body(req)?;
    let valid = validate::validate_registration(payload)?;

    let password_hash = password::hash_password(&valid.password)?;
    let role = valid.role.unwrap_or(Role::User);
    let now = now_unix();

    let (token, user) = app.db.with_conn(|conn| {
        let id = users::create_user(conn, &valid.name, &valid.email, &password_hash, role, now)?;
        let token = sessions::create_session(conn, id, now)?;
        Ok((
            token,
            User {
                id,
                name: valid.name.clone(),
                email: valid.email.clone(),
                role,
            },
        ))
    })?;

    info!(user_id = user.id, "user registered");
    json_response_with_status(201, &json!({ "token": token, "user": user }))
}

fn login(req: &mut Request, app: &App) -> ResultResp {
    let payload: validate::LoginPayload = read_json_body(req)?;
    let valid = validate::validate_login(payload)?;

    let record = app
        .db
        .with_conn(|conn| users::find_by_email(conn, &valid.email))?
        .ok_or_else(|| ServerError::Unauthorized("invalid_credentials".to_string()))?;

    if !password::verify_password(&valid.password, &record.password_hash) {
        return Err(ServerError::Unauthorized("invalid_credentials".to_string()));
    }

    let token = app
        .db
        .with_conn(|conn| sessions::create_session(conn, record.user.id, now_unix()))?;

    json_response(&json!({ "token": token, "user": record.user }))
}

fn me(req: &Request, app: &App) -> ResultResp {
    let user = current_user(req, app)?;
    json_response(&json!({ "user": user }))
}

/// Resolve the Authorization header to a user, or fail with the same codes
/// the rest of the API family uses.
fn current_user(req: &Request, app: &App) -> Result<User, ServerError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ServerError::Unauthorized("unauthorized".to_string()))?;

    let token = sessions::bearer_token(header)
        .ok_or_else(|| ServerError::Unauthorized("unauthorized".to_string()))?;

    app.db
        .with_conn(|conn| sessions::load_user_from_token(conn, token, now_unix()))?
        .ok_or_else(|| ServerError::Unauthorized("invalid_token".to_string()))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    match req.uri().query() {
        Some(q) => url::form_urlencoded::parse(q.as_bytes())
            .into_owned()
            .collect(),
        None => HashMap::new(),
    }
}

fn read_json_body<T: DeserializeOwned>(req: &mut Request) -> Result<T, ServerError> {
    let mut bytes = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_BODY_BYTES)
        .read_to_end(&mut bytes)
        .map_err(|e| ServerError::BadRequest(format!("read body failed: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ServerError::BadRequest(format!("invalid json body: {e}")))
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
