use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

use crate::errors::ServerError;

/// Translate a ServerError into the JSON error body the API speaks.
/// Store failures surface as 500s; the engine never masks them.
pub fn error_to_response(err: ServerError) -> Response {
    let (status, body) = match err {
        ServerError::NotFound => (404, json!({ "error": "not_found" })),
        ServerError::BadRequest(msg) => (400, json!({ "error": msg })),
        ServerError::Validation(fields) => (400, json!({ "errors": fields })),
        ServerError::Unauthorized(code) => (401, json!({ "error": code })),
        ServerError::Forbidden => (403, json!({ "error": "forbidden" })),
        ServerError::Conflict(code) => (409, json!({ "error": code })),
        ServerError::DbError(details) => (500, json!({ "error": "db_error", "details": details })),
        ServerError::InternalError => (500, json!({ "error": "internal_error" })),
    };

    json_error_response(status, &body)
}

fn json_error_response(status: u16, body: &serde_json::Value) -> Response {
    let bytes = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(bytes))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}
