// src/db/users.rs
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, ToSql};
use serde::Serialize;

use crate::errors::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Agent => "agent",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "agent" => Some(Role::Agent),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Listing publication is limited to agents and admins.
    pub fn can_publish(&self) -> bool {
        matches!(self, Role::Agent | Role::Admin)
    }
}

impl ToSql for Role {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Role {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()
            .and_then(|s| Role::parse(s).ok_or(FromSqlError::InvalidType))
    }
}

/// A user as exposed through the API (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Internal row including the credential hash; never serialized.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

/// Insert a new user. Email should already be normalized by the caller
/// (trim/lowercase). A duplicate email maps to `Conflict`.
pub fn create_user(
    conn: &Connection,
    name: &str,
    email: &str,
    password_hash: &str,
    role: Role,
    now: i64,
) -> Result<i64, ServerError> {
    let result = conn.execute(
        "insert into users (name, email, password_hash, role, created_at) values (?, ?, ?, ?, ?)",
        params![name, email, password_hash, role, now],
    );

    match result {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(ServerError::Conflict("email_in_use".to_string()))
        }
        Err(e) => Err(ServerError::DbError(format!("insert user failed: {e}"))),
    }
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<UserRecord>, ServerError> {
    conn.query_row(
        "select id, name, email, role, password_hash from users where email = ?",
        params![email],
        |row| {
            Ok(UserRecord {
                user: User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    role: row.get(3)?,
                },
                password_hash: row.get(4)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}
