// Import a scraped-listings JSON file into the listing store.
//
// Usage: import_listings <file.json>

use tracing::{error, info};

use ndola_homes::config::Config;
use ndola_homes::db::{init_db, Database};
use ndola_homes::import::import_file;

fn main() {
    tracing_subscriber::fmt().init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: import_listings <file.json>");
        std::process::exit(2);
    };

    let config = Config::from_env();
    let db = Database::new(config.db_file.clone());

    if let Err(e) = init_db(&db, "sql/schema.sql") {
        error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    match import_file(&db, &path) {
        Ok(report) => {
            info!(
                "import complete: {} imported, {} skipped",
                report.imported, report.skipped
            );
        }
        Err(e) => {
            error!("import failed: {e}");
            std::process::exit(1);
        }
    }
}
