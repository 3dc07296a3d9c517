// Scrape Ndola property portals (or generate sample data) into a JSON file
// that import_listings understands.
//
// Usage: scrape_listings [scrape|sample]

use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info, warn};

use ndola_homes::scraper::sources::SOURCES;
use ndola_homes::scraper::{sample_listings, PortalScraper, ScrapeFile, ScrapedListing};

fn main() {
    tracing_subscriber::fmt().init();

    let command = std::env::args().nth(1).unwrap_or_default();
    let properties = match command.as_str() {
        "scrape" => {
            let listings = scrape();
            if listings.is_empty() {
                warn!("scraping produced nothing, generating sample data instead");
                sample_listings()
            } else {
                listings
            }
        }
        "sample" => sample_listings(),
        _ => {
            eprintln!("Usage: scrape_listings [scrape|sample]");
            eprintln!("  scrape - attempt to scrape real properties from the portals");
            eprintln!("  sample - generate realistic sample data");
            std::process::exit(2);
        }
    };

    match save(&properties) {
        Ok(path) => info!("saved {} properties to {}", properties.len(), path.display()),
        Err(e) => {
            error!("saving scrape output failed: {e}");
            std::process::exit(1);
        }
    }
}

fn scrape() -> Vec<ScrapedListing> {
    match PortalScraper::new() {
        Ok(scraper) => scraper.scrape_all(),
        Err(e) => {
            warn!("scraper init failed: {e}");
            Vec::new()
        }
    }
}

fn save(properties: &[ScrapedListing]) -> std::io::Result<PathBuf> {
    let out_dir = PathBuf::from("data");
    fs::create_dir_all(&out_dir)?;

    let now = Utc::now();
    let path = out_dir.join(format!("ndola-properties-{}.json", now.timestamp()));

    let file = ScrapeFile {
        scraped_at: now.to_rfc3339(),
        total_properties: properties.len(),
        sources: SOURCES.iter().map(|s| s.name.to_string()).collect(),
        properties: properties.to_vec(),
    };

    fs::write(&path, serde_json::to_string_pretty(&file)?)?;
    Ok(path)
}
