// src/db/media.rs
use rusqlite::{params, Connection};
use std::collections::HashMap;

use crate::domain::{MediaDescriptor, NewMedia};
use crate::errors::ServerError;

/// Batch-fetch media for a set of listing ids. Every requested id gets an
/// entry in the returned map, empty when the listing has no media, so
/// callers never hit a missing key.
pub fn find_by_listing_ids(
    conn: &Connection,
    listing_ids: &[i64],
) -> Result<HashMap<i64, Vec<MediaDescriptor>>, ServerError> {
    let mut by_listing: HashMap<i64, Vec<MediaDescriptor>> = listing_ids
        .iter()
        .map(|id| (*id, Vec::new()))
        .collect();

    if listing_ids.is_empty() {
        return Ok(by_listing);
    }

    let placeholders = vec!["?"; listing_ids.len()].join(",");
    let sql = format!(
        "select id, listing_id, url, kind from media where listing_id in ({placeholders}) order by id"
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| ServerError::DbError(format!("prepare media lookup failed: {e}")))?;

    let rows = stmt
        .query_map(rusqlite::params_from_iter(listing_ids.iter()), |row| {
            Ok(MediaDescriptor {
                id: row.get(0)?,
                listing_id: row.get(1)?,
                url: row.get(2)?,
                kind: row.get(3)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("media lookup failed: {e}")))?;

    for row in rows {
        let media = row.map_err(|e| ServerError::DbError(format!("media row failed: {e}")))?;
        if let Some(bucket) = by_listing.get_mut(&media.listing_id) {
            bucket.push(media);
        }
    }

    Ok(by_listing)
}

/// Media for one listing, in insertion order.
pub fn find_by_listing_id(
    conn: &Connection,
    listing_id: i64,
) -> Result<Vec<MediaDescriptor>, ServerError> {
    let mut stmt = conn
        .prepare("select id, listing_id, url, kind from media where listing_id = ? order by id")
        .map_err(|e| ServerError::DbError(format!("prepare media select failed: {e}")))?;

    let rows = stmt
        .query_map(params![listing_id], |row| {
            Ok(MediaDescriptor {
                id: row.get(0)?,
                listing_id: row.get(1)?,
                url: row.get(2)?,
                kind: row.get(3)?,
            })
        })
        .map_err(|e| ServerError::DbError(format!("media select failed: {e}")))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| ServerError::DbError(format!("media row failed: {e}")))?);
    }
    Ok(out)
}

pub fn insert_media(
    conn: &Connection,
    listing_id: i64,
    media: &[NewMedia],
) -> Result<(), ServerError> {
    let mut stmt = conn
        .prepare("insert into media (listing_id, url, kind) values (?, ?, ?)")
        .map_err(|e| ServerError::DbError(format!("prepare media insert failed: {e}")))?;

    for item in media {
        stmt.execute(params![listing_id, item.url, item.kind])
            .map_err(|e| ServerError::DbError(format!("insert media failed: {e}")))?;
    }
    Ok(())
}
