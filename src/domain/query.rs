// src/domain/query.rs
use rusqlite::types::Value;

use crate::domain::listing::ListingKind;

/// Approximate kilometers per degree of latitude.
const KM_PER_DEGREE: f64 = 111.0;

/// Search filters for the listing query engine. Every field is optional;
/// the geo triple is all-or-nothing and silently skipped when incomplete.
/// Values are assumed range-checked by the caller (see `validate`).
#[derive(Debug, Clone)]
pub struct ListingQuery {
    /// Substring match against title, description, area and address.
    pub term: Option<String>,
    pub kind: Option<ListingKind>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    /// Matches listings with at least this many bedrooms.
    pub min_bedrooms: Option<i64>,
    /// Case-insensitive exact match.
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            term: None,
            kind: None,
            min_price: None,
            max_price: None,
            min_bedrooms: None,
            city: None,
            latitude: None,
            longitude: None,
            radius_km: None,
            limit: 20,
            offset: 0,
        }
    }
}

/// Axis-aligned latitude/longitude window approximating a radius search.
/// Cheap and adequate at city scale; not great-circle distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Build the window around a center point. The longitude delta widens
    /// with latitude; the cosine factor is replaced by 1.0 when it reaches
    /// zero so the division stays defined at the poles.
    pub fn around(lat: f64, lon: f64, radius_km: f64) -> Self {
        let lat_delta = radius_km / KM_PER_DEGREE;
        let mut cos_lat = lat.to_radians().cos();
        if cos_lat == 0.0 {
            cos_lat = 1.0;
        }
        let lon_delta = radius_km / (KM_PER_DEGREE * cos_lat);

        Self {
            min_lat: lat - lat_delta,
            max_lat: lat + lat_delta,
            min_lon: lon - lon_delta,
            max_lon: lon + lon_delta,
        }
    }
}

impl ListingQuery {
    /// The geo filter applies only when all three parameters are present.
    /// A partial triple is skipped, matching the observed upstream behavior.
    pub fn geo_window(&self) -> Option<BoundingBox> {
        match (self.latitude, self.longitude, self.radius_km) {
            (Some(lat), Some(lon), Some(r)) => Some(BoundingBox::around(lat, lon, r)),
            _ => None,
        }
    }

    /// Compose the supplied filters into a SQL WHERE clause plus its
    /// positional parameters. All predicates are ANDed. Returns an empty
    /// string when no filter is set.
    ///
    /// SQLite LIKE is ASCII-case-insensitive, which is this engine's
    /// (consistent) choice for the free-text match.
    pub fn where_clause(&self) -> (String, Vec<Value>) {
        let mut conditions: Vec<&str> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(term) = self.term.as_deref() {
            conditions
                .push("(title like ? or description like ? or area like ? or address like ?)");
            let pattern = format!("%{term}%");
            for _ in 0..4 {
                params.push(Value::from(pattern.clone()));
            }
        }
        if let Some(kind) = self.kind {
            conditions.push("kind = ?");
            params.push(Value::from(kind.as_str().to_string()));
        }
        if let Some(min_price) = self.min_price {
            conditions.push("price >= ?");
            params.push(Value::from(min_price));
        }
        if let Some(max_price) = self.max_price {
            conditions.push("price <= ?");
            params.push(Value::from(max_price));
        }
        if let Some(min_bedrooms) = self.min_bedrooms {
            conditions.push("bedrooms >= ?");
            params.push(Value::from(min_bedrooms));
        }
        if let Some(city) = self.city.as_deref() {
            conditions.push("lower(city) = lower(?)");
            params.push(Value::from(city.to_string()));
        }
        if let Some(window) = self.geo_window() {
            conditions.push("latitude is not null and longitude is not null");
            conditions.push("latitude between ? and ?");
            params.push(Value::from(window.min_lat));
            params.push(Value::from(window.max_lat));
            conditions.push("longitude between ? and ?");
            params.push(Value::from(window.min_lon));
            params.push(Value::from(window.max_lon));
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!("where {}", conditions.join(" and ")), params)
        }
    }
}
