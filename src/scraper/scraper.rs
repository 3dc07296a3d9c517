// src/scraper/scraper.rs
use chrono::Utc;
use rand::Rng;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{info, warn};

use crate::domain::ListingKind;
use crate::scraper::models::ScrapedListing;
use crate::scraper::scraper_error::ScraperError;
use crate::scraper::sources::{PortalSource, SOURCES};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

// Approximate city bounds used to place listings that come without
// coordinates somewhere plausible on the map.
const NDOLA_LAT: (f64, f64) = (-12.9900, -12.9400);
const NDOLA_LON: (f64, f64) = (28.6000, 28.6700);

const NDOLA_AREAS: &[&str] = &[
    "Northrise",
    "Kansenshi",
    "Riverside",
    "Masala",
    "Chipulukusu",
    "Kabushi",
    "Itawa",
    "Lubuto",
    "Ndeke",
    "Mushili",
    "Twapia",
];

pub struct PortalScraper {
    client: Client,
}

impl PortalScraper {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Scrape every configured portal, politely pausing between sources.
    /// A failing portal is logged and skipped; the others still contribute.
    pub fn scrape_all(&self) -> Vec<ScrapedListing> {
        let mut all = Vec::new();
        for (i, source) in SOURCES.iter().enumerate() {
            if i > 0 {
                std::thread::sleep(Duration::from_secs(2));
            }
            match self.scrape_source(source) {
                Ok(mut listings) => {
                    info!("{}: {} listings", source.name, listings.len());
                    all.append(&mut listings);
                }
                Err(e) => warn!("scraping {} failed: {e}", source.name),
            }
        }
        all
    }

    pub fn scrape_source(&self, source: &PortalSource) -> Result<Vec<ScrapedListing>, ScraperError> {
        let resp = self
            .client
            .get(source.search_url)
            .send()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ScraperError::BadStatus(resp.status().to_string()));
        }

        let body = resp
            .text()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(parse_portal_page(&body, source))
    }
}

fn parse_portal_page(html: &str, source: &PortalSource) -> Vec<ScrapedListing> {
    let doc = Html::parse_document(html);

    let sel = |css: &str| Selector::parse(css).ok();
    let Some(card_sel) = sel(source.selectors.listings) else {
        return Vec::new();
    };
    let title_sel = sel(source.selectors.title);
    let price_sel = sel(source.selectors.price);
    let desc_sel = sel(source.selectors.description);
    let bed_sel = sel(source.selectors.bedrooms);
    let bath_sel = sel(source.selectors.bathrooms);
    let loc_sel = sel(source.selectors.location);
    let img_sel = sel(source.selectors.image);
    let link_sel = sel(source.selectors.link);

    let mut listings = Vec::new();
    for card in doc.select(&card_sel) {
        let title = select_text(&card, title_sel.as_ref()).unwrap_or_default();
        let price_text = select_text(&card, price_sel.as_ref()).unwrap_or_default();
        let description = select_text(&card, desc_sel.as_ref()).unwrap_or_default();
        let location = select_text(&card, loc_sel.as_ref()).unwrap_or_default();

        let price = parse_price(&price_text);
        if title.is_empty() || price <= 0 {
            continue;
        }

        let (latitude, longitude) = random_ndola_coordinate();
        let fallback_desc = format!(
            "Property in {}",
            if location.is_empty() { "Ndola" } else { &location }
        );

        listings.push(ScrapedListing {
            title: truncate_chars(&title, 200),
            description: Some(if description.is_empty() {
                fallback_desc
            } else {
                truncate_chars(&description, 500)
            }),
            price,
            kind: determine_kind(&price_text, &description),
            bedrooms: select_text(&card, bed_sel.as_ref()).as_deref().and_then(extract_number),
            bathrooms: select_text(&card, bath_sel.as_ref()).as_deref().and_then(extract_number),
            city: Some("Ndola".to_string()),
            area: extract_area(&location).or_else(|| Some("Ndola".to_string())),
            address: (!location.is_empty()).then(|| location.clone()),
            owner_name: None,
            owner_email: None,
            owner_phone: extract_phone(&description),
            latitude: Some(latitude),
            longitude: Some(longitude),
            thumbnail_url: select_attr(&card, img_sel.as_ref(), "src")
                .and_then(|src| resolve_url(source.base_url, &src)),
            source: Some(source.name.to_string()),
            source_url: select_attr(&card, link_sel.as_ref(), "href")
                .and_then(|href| resolve_url(source.base_url, &href)),
            scraped_at: Some(Utc::now().to_rfc3339()),
        });
    }
    listings
}

fn select_text(card: &ElementRef<'_>, selector: Option<&Selector>) -> Option<String> {
    let el = card.select(selector?).next()?;
    let text: String = el.text().collect();
    let text = text.trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn select_attr(card: &ElementRef<'_>, selector: Option<&Selector>, attr: &str) -> Option<String> {
    card.select(selector?)
        .next()?
        .value()
        .attr(attr)
        .map(str::to_string)
}

/// First run of digits in the text, e.g. "3 beds" -> 3.
pub fn extract_number(text: &str) -> Option<i64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Strip currency noise and parse. USD amounts are converted to ZMW with a
/// flat approximate rate.
pub fn parse_price(price_text: &str) -> i64 {
    let clean: String = price_text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let number: f64 = match clean.replace(',', "").parse() {
        Ok(n) => n,
        Err(_) => return 0,
    };

    let lower = price_text.to_lowercase();
    if lower.contains("usd") || price_text.contains('$') {
        (number * 25.0).round() as i64
    } else {
        number.round() as i64
    }
}

pub fn determine_kind(price_text: &str, description: &str) -> ListingKind {
    let text = format!("{price_text} {description}").to_lowercase();
    if text.contains("rent") || text.contains("/month") || text.contains("monthly") {
        ListingKind::Rent
    } else {
        ListingKind::Sale
    }
}

/// Match the location text against well-known Ndola areas.
pub fn extract_area(location: &str) -> Option<String> {
    let lower = location.to_lowercase();
    NDOLA_AREAS
        .iter()
        .find(|area| lower.contains(&area.to_lowercase()))
        .map(|area| area.to_string())
}

/// Find a Zambian mobile number: `+260` or `0`, then a 7/9 block of nine
/// digits, separators allowed between groups. Returns it with separators
/// stripped.
pub fn extract_phone(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    (0..chars.len()).find_map(|start| match_phone(&chars[start..]))
}

fn match_phone(chars: &[char]) -> Option<String> {
    let mut out = String::new();
    let mut i = 0;

    match chars.first().copied()? {
        '+' => {
            if chars.get(1).copied()? == '2'
                && chars.get(2).copied()? == '6'
                && chars.get(3).copied()? == '0'
            {
                out.push_str("+260");
                i = 4;
            } else {
                return None;
            }
        }
        '0' => {
            out.push('0');
            i = 1;
        }
        _ => return None,
    }

    i = skip_separator(chars, i);
    if !matches!(chars.get(i).copied(), Some('7') | Some('9')) {
        return None;
    }
    i = take_digits(chars, i, 3, &mut out)?;
    i = skip_separator(chars, i);
    i = take_digits(chars, i, 3, &mut out)?;
    i = skip_separator(chars, i);
    take_digits(chars, i, 3, &mut out)?;

    Some(out)
}

fn skip_separator(chars: &[char], i: usize) -> usize {
    match chars.get(i).copied() {
        Some(' ') | Some('-') => i + 1,
        _ => i,
    }
}

fn take_digits(chars: &[char], mut i: usize, n: usize, out: &mut String) -> Option<usize> {
    for _ in 0..n {
        let c = chars.get(i).copied()?;
        if !c.is_ascii_digit() {
            return None;
        }
        out.push(c);
        i += 1;
    }
    Some(i)
}

pub fn random_ndola_coordinate() -> (f64, f64) {
    let mut rng = rand::thread_rng();
    (
        rng.gen_range(NDOLA_LAT.0..=NDOLA_LAT.1),
        rng.gen_range(NDOLA_LON.0..=NDOLA_LON.1),
    )
}

fn resolve_url(base: &str, href: &str) -> Option<String> {
    url::Url::parse(base)
        .ok()?
        .join(href)
        .ok()
        .map(|u| u.to_string())
}

pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Realistic demo data for when the portals are unreachable.
pub fn sample_listings() -> Vec<ScrapedListing> {
    let now = Utc::now().to_rfc3339();
    let sample = |title: &str,
                  description: &str,
                  price: i64,
                  kind: ListingKind,
                  bedrooms: i64,
                  bathrooms: i64,
                  area: &str,
                  address: &str,
                  phone: &str,
                  lat: f64,
                  lon: f64| ScrapedListing {
        title: title.to_string(),
        description: Some(description.to_string()),
        price,
        kind,
        bedrooms: Some(bedrooms),
        bathrooms: Some(bathrooms),
        city: Some("Ndola".to_string()),
        area: Some(area.to_string()),
        address: Some(address.to_string()),
        owner_name: None,
        owner_email: None,
        owner_phone: Some(phone.to_string()),
        latitude: Some(lat),
        longitude: Some(lon),
        thumbnail_url: None,
        source: Some("Generated Sample".to_string()),
        source_url: None,
        scraped_at: Some(now.clone()),
    };

    vec![
        sample(
            "Executive 4-Bedroom House - Northrise",
            "Spacious executive home in prestigious Northrise area. Features include modern kitchen, master ensuite, garage, and beautiful garden.",
            650_000,
            ListingKind::Sale,
            4,
            3,
            "Northrise",
            "Plot 156, Northrise Road",
            "+260977234567",
            -12.9584,
            28.6369,
        ),
        sample(
            "Modern 2-Bedroom Apartment - Kansenshi",
            "Well-appointed apartment in secure complex. Features air conditioning, fitted kitchen, and parking.",
            3_200,
            ListingKind::Rent,
            2,
            2,
            "Kansenshi",
            "Block 12, Kansenshi Heights",
            "+260966345678",
            -12.9700,
            28.6200,
        ),
        sample(
            "Luxury Villa with Swimming Pool - Riverside",
            "Stunning luxury villa featuring 5 bedrooms, swimming pool, landscaped gardens, and staff quarters.",
            1_200_000,
            ListingKind::Sale,
            5,
            4,
            "Riverside",
            "House 23, Riverside Estate",
            "+260955456789",
            -12.9500,
            28.6500,
        ),
        sample(
            "Affordable Family Home - Chipulukusu",
            "Great starter home for growing families. 3 bedrooms, large living area, and spacious yard.",
            280_000,
            ListingKind::Sale,
            3,
            2,
            "Chipulukusu",
            "Plot 89, Chipulukusu Extension",
            "+260944567890",
            -12.9800,
            28.6300,
        ),
        sample(
            "Studio Apartment - City Center",
            "Compact studio apartment in the heart of Ndola. Walking distance to shops and offices.",
            1_500,
            ListingKind::Rent,
            1,
            1,
            "City Center",
            "Flat 8C, Central Plaza",
            "+260933678901",
            -12.9650,
            28.6350,
        ),
    ]
}
