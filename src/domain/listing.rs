// src/domain/listing.rs
use chrono::NaiveDateTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

/// Whether a property is offered for sale or for rent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    #[default]
    Sale,
    Rent,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Sale => "sale",
            ListingKind::Rent => "rent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sale" => Some(ListingKind::Sale),
            "rent" => Some(ListingKind::Rent),
            _ => None,
        }
    }
}

impl ToSql for ListingKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ListingKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()
            .and_then(|s| ListingKind::parse(s).ok_or(FromSqlError::InvalidType))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "image" => Some(MediaKind::Image),
            "video" => Some(MediaKind::Video),
            _ => None,
        }
    }
}

impl ToSql for MediaKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for MediaKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()
            .and_then(|s| MediaKind::parse(s).ok_or(FromSqlError::InvalidType))
    }
}

/// A property listing as projected out of the store. Provenance columns
/// (source, source_url, scraped_at) are intentionally not part of this
/// projection; they only matter to the import tools.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub kind: ListingKind,
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
    pub thumbnail_url: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Media attached to a listing.
#[derive(Debug, Clone, Serialize)]
pub struct MediaDescriptor {
    pub id: i64,
    pub listing_id: i64,
    pub url: String,
    pub kind: MediaKind,
}

/// A listing enriched with its media, the shape the search endpoint returns.
#[derive(Debug, Clone, Serialize)]
pub struct ListingWithMedia {
    #[serde(flatten)]
    pub listing: Listing,
    pub media: Vec<MediaDescriptor>,
}

/// One page of search results plus the total match count.
#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub items: Vec<ListingWithMedia>,
    pub total: i64,
}

/// Input for creating a listing, either from the publish endpoint or from
/// the import tools (which also fill in provenance).
#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub kind: ListingKind,
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
    pub thumbnail_url: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub scraped_at: Option<String>,
}

/// A media entry supplied alongside a new listing.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMedia {
    pub url: String,
    pub kind: MediaKind,
}
