// src/db/listings.rs
use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::connection::Database;
use crate::db::media;
use crate::domain::{Listing, ListingQuery, ListingWithMedia, NewListing, NewMedia, SearchPage};
use crate::errors::ServerError;

const LISTING_COLUMNS: &str = "id, title, description, price, kind, bedrooms, bathrooms, \
     city, area, address, owner_name, owner_email, owner_phone, \
     latitude, longitude, thumbnail_url, created_at";

fn map_listing(row: &rusqlite::Row<'_>) -> rusqlite::Result<Listing> {
    Ok(Listing {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        kind: row.get(4)?,
        bedrooms: row.get(5)?,
        bathrooms: row.get(6)?,
        city: row.get(7)?,
        area: row.get(8)?,
        address: row.get(9)?,
        owner_name: row.get(10)?,
        owner_email: row.get(11)?,
        owner_phone: row.get(12)?,
        latitude: row.get(13)?,
        longitude: row.get(14)?,
        thumbnail_url: row.get(15)?,
        created_at: row.get(16)?,
    })
}

/// The listing query engine: one filtered/ordered/paginated page, each item
/// enriched with its media, plus the total count of matches ignoring
/// pagination. Three reads against the store; the media batch only covers
/// the page's ids and is skipped outright when the page is empty.
pub fn search(db: &Database, query: &ListingQuery) -> Result<SearchPage, ServerError> {
    db.with_conn(|conn| {
        let (where_sql, filter_params) = query.where_clause();

        let page_sql = format!(
            "select {LISTING_COLUMNS} from listings {where_sql} \
             order by created_at desc, id desc limit ? offset ?"
        );
        let mut page_params = filter_params.clone();
        page_params.push(Value::from(query.limit));
        page_params.push(Value::from(query.offset));

        let mut stmt = conn
            .prepare(&page_sql)
            .map_err(|e| ServerError::DbError(format!("prepare listing search failed: {e}")))?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(page_params), map_listing)
            .map_err(|e| ServerError::DbError(format!("listing search failed: {e}")))?;

        let mut page: Vec<Listing> = Vec::new();
        for row in rows {
            page.push(row.map_err(|e| ServerError::DbError(format!("listing row failed: {e}")))?);
        }

        let mut media_by_listing = if page.is_empty() {
            Default::default()
        } else {
            let ids: Vec<i64> = page.iter().map(|l| l.id).collect();
            media::find_by_listing_ids(conn, &ids)?
        };

        let items: Vec<ListingWithMedia> = page
            .into_iter()
            .map(|listing| ListingWithMedia {
                media: media_by_listing.remove(&listing.id).unwrap_or_default(),
                listing,
            })
            .collect();

        let total = count(conn, &where_sql, filter_params)?;

        Ok(SearchPage { items, total })
    })
}

/// Match count under the same predicates as `search`, ignoring pagination.
fn count(conn: &Connection, where_sql: &str, filter_params: Vec<Value>) -> Result<i64, ServerError> {
    let sql = format!("select count(*) from listings {where_sql}");
    conn.query_row(&sql, rusqlite::params_from_iter(filter_params), |row| {
        row.get(0)
    })
    .map_err(|e| ServerError::DbError(format!("listing count failed: {e}")))
}

/// One listing with its media, or None when the id is unknown.
pub fn get_with_media(db: &Database, id: i64) -> Result<Option<ListingWithMedia>, ServerError> {
    db.with_conn(|conn| {
        let sql = format!("select {LISTING_COLUMNS} from listings where id = ?");
        let listing = conn
            .query_row(&sql, params![id], map_listing)
            .optional()
            .map_err(|e| ServerError::DbError(format!("listing lookup failed: {e}")))?;

        match listing {
            None => Ok(None),
            Some(listing) => {
                let media = media::find_by_listing_id(conn, listing.id)?;
                Ok(Some(ListingWithMedia { listing, media }))
            }
        }
    })
}

/// Insert a listing and its media rows in one transaction.
/// Returns the new listing id.
pub fn insert(db: &Database, new: &NewListing, media: &[NewMedia]) -> Result<i64, ServerError> {
    let now = Utc::now().naive_utc();

    db.with_conn(|conn| {
        let tx = conn
            .transaction()
            .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

        tx.execute(
            r#"
            insert into listings (
                title, description, price, kind, bedrooms, bathrooms,
                city, area, address, owner_name, owner_email, owner_phone,
                latitude, longitude, thumbnail_url,
                source, source_url, scraped_at, created_at
            ) values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)
            "#,
            params![
                new.title,
                new.description,
                new.price,
                new.kind,
                new.bedrooms,
                new.bathrooms,
                new.city,
                new.area,
                new.address,
                new.owner_name,
                new.owner_email,
                new.owner_phone,
                new.latitude,
                new.longitude,
                new.thumbnail_url,
                new.source,
                new.source_url,
                new.scraped_at,
                now,
            ],
        )
        .map_err(|e| ServerError::DbError(format!("insert listing failed: {e}")))?;

        let listing_id = tx.last_insert_rowid();
        media::insert_media(&tx, listing_id, media)?;

        tx.commit()
            .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;

        Ok(listing_id)
    })
}
