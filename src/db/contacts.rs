// src/db/contacts.rs
use chrono::Utc;
use rusqlite::{params, Connection};

use crate::errors::ServerError;

/// A contact-form submission, stored and then relayed by email.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub listing_id: Option<i64>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

pub fn insert_contact(conn: &Connection, msg: &ContactMessage) -> Result<i64, ServerError> {
    let now = Utc::now().naive_utc();
    conn.execute(
        "insert into contacts (listing_id, name, email, phone, message, created_at) \
         values (?, ?, ?, ?, ?, ?)",
        params![msg.listing_id, msg.name, msg.email, msg.phone, msg.message, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert contact failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_contact_stores_the_row() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(include_str!("../../sql/schema.sql"))
            .unwrap();

        let id = insert_contact(
            &conn,
            &ContactMessage {
                listing_id: None,
                name: "Jane Phiri".to_string(),
                email: "jane@example.com".to_string(),
                phone: Some("+260971234567".to_string()),
                message: "Is this still available?".to_string(),
            },
        )
        .unwrap();
        assert!(id > 0);

        let (name, listing_id): (String, Option<i64>) = conn
            .query_row(
                "select name, listing_id from contacts where id = ?",
                params![id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(name, "Jane Phiri");
        assert_eq!(listing_id, None);
    }
}
