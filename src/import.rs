// src/import.rs
//
// Load scraped-listing JSON files into the listing store. Accepts either
// the wrapper format the scrape tool writes ({"properties": [...]}) or a
// bare array of records.

use std::fs;
use tracing::warn;

use crate::db::{listings, Database};
use crate::domain::NewListing;
use crate::errors::ServerError;
use crate::scraper::models::ScrapedListing;
use crate::scraper::scraper::truncate_chars;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

pub fn import_file(db: &Database, path: &str) -> Result<ImportReport, ServerError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| ServerError::BadRequest(format!("read {path} failed: {e}")))?;

    let value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| ServerError::BadRequest(format!("parse {path} failed: {e}")))?;

    let records = value
        .get("properties")
        .cloned()
        .unwrap_or(value)
        .as_array()
        .cloned()
        .ok_or_else(|| {
            ServerError::BadRequest("invalid data format, expected an array of properties".into())
        })?;

    import_records(db, records)
}

fn import_records(
    db: &Database,
    records: Vec<serde_json::Value>,
) -> Result<ImportReport, ServerError> {
    let mut report = ImportReport::default();

    for record in records {
        let parsed: ScrapedListing = match serde_json::from_value(record) {
            Ok(p) => p,
            Err(e) => {
                warn!("skipping malformed record: {e}");
                report.skipped += 1;
                continue;
            }
        };

        match to_new_listing(parsed) {
            Some(new) => {
                listings::insert(db, &new, &[])?;
                report.imported += 1;
            }
            None => report.skipped += 1,
        }
    }

    Ok(report)
}

/// Records need at least a title, a positive price and a city; long text
/// fields are clamped to the lengths the rest of the system assumes.
fn to_new_listing(record: ScrapedListing) -> Option<NewListing> {
    if record.title.trim().is_empty() || record.price <= 0 {
        return None;
    }
    let city = record.city.as_deref().map(str::trim).filter(|c| !c.is_empty())?;

    Some(NewListing {
        title: truncate_chars(record.title.trim(), 200),
        description: record
            .description
            .as_deref()
            .map(|d| truncate_chars(d, 500))
            .unwrap_or_default(),
        price: record.price,
        kind: record.kind,
        bedrooms: record.bedrooms,
        bathrooms: record.bathrooms,
        city: city.to_string(),
        area: record.area,
        address: record.address,
        owner_name: record.owner_name,
        owner_email: record.owner_email,
        owner_phone: record.owner_phone,
        latitude: record.latitude,
        longitude: record.longitude,
        thumbnail_url: record.thumbnail_url,
        source: record.source,
        source_url: record.source_url,
        scraped_at: record.scraped_at,
    })
}
