use astra::Response;
use std::fmt;

/// One failing input field, reported back to the client.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors originating from either the server logic
/// (routing, validation, auth) or downstream layers (DB, mailer).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    /// Malformed query/body parameters, with every failing field listed.
    Validation(Vec<FieldError>),
    Unauthorized(String),
    Forbidden,
    Conflict(String),
    DbError(String),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::Validation(fields) => {
                let names: Vec<&str> = fields.iter().map(|e| e.field).collect();
                write!(f, "Validation failed: {}", names.join(", "))
            }
            ServerError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            ServerError::Forbidden => write!(f, "Forbidden"),
            ServerError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            ServerError::DbError(msg) => write!(f, "Database Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
