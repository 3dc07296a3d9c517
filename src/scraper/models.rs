// src/scraper/models.rs
use serde::{Deserialize, Serialize};

use crate::domain::ListingKind;

/// One property as scraped from a portal (or generated as a sample), the
/// record format of the JSON files the import tool consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedListing {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: i64,
    /// Records without a kind are treated as sales.
    #[serde(default)]
    pub kind: ListingKind,
    #[serde(default)]
    pub bedrooms: Option<i64>,
    #[serde(default)]
    pub bathrooms: Option<i64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub owner_email: Option<String>,
    #[serde(default)]
    pub owner_phone: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub scraped_at: Option<String>,
}

/// Wrapper the scrape tool writes to disk.
#[derive(Debug, Serialize, Deserialize)]
pub struct ScrapeFile {
    pub scraped_at: String,
    pub total_properties: usize,
    pub sources: Vec<String>,
    pub properties: Vec<ScrapedListing>,
}
