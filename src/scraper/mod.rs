pub mod models;
pub mod scraper;
pub mod scraper_error;
pub mod sources;

pub use models::{ScrapeFile, ScrapedListing};
pub use scraper::{sample_listings, PortalScraper};
pub use scraper_error::ScraperError;
