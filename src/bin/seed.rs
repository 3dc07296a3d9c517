// Reset the database and load the demo accounts + listings.

use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info};

use ndola_homes::auth::password::hash_password;
use ndola_homes::config::Config;
use ndola_homes::db::users::Role;
use ndola_homes::db::{init_db, listings, users, Database};
use ndola_homes::domain::{ListingKind, NewListing};
use ndola_homes::errors::ServerError;

fn main() {
    tracing_subscriber::fmt().init();

    let config = Config::from_env();
    let db = Database::new(config.db_file.clone());

    if let Err(e) = run(&db) {
        error!("seed failed: {e}");
        std::process::exit(1);
    }
    info!("seeded users and listings into {}", config.db_file);
}

fn run(db: &Database) -> Result<(), ServerError> {
    init_db(db, "sql/schema.sql")?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);

    db.with_conn(|conn| {
        conn.execute_batch(
            "delete from media; delete from listings; delete from sessions; delete from users;",
        )
        .map_err(|e| ServerError::DbError(format!("wipe tables failed: {e}")))
    })?;

    // Demo accounts, one per role.
    let accounts = [
        ("Admin", "admin@example.com", "admin123", Role::Admin),
        ("Agent Smith", "agent@example.com", "agent123", Role::Agent),
        ("John Doe", "user@example.com", "user123", Role::User),
    ];
    for (name, email, pass, role) in accounts {
        let hash = hash_password(pass)?;
        db.with_conn(|conn| users::create_user(conn, name, email, &hash, role, now))?;
    }

    for listing in demo_listings() {
        listings::insert(db, &listing, &[])?;
    }

    Ok(())
}

fn demo_listings() -> Vec<NewListing> {
    let agent = |title: &str,
                 description: &str,
                 price: i64,
                 kind: ListingKind,
                 bedrooms: i64,
                 bathrooms: i64,
                 area: &str,
                 address: &str,
                 lat: f64,
                 lon: f64| NewListing {
        title: title.to_string(),
        description: description.to_string(),
        price,
        kind,
        bedrooms: Some(bedrooms),
        bathrooms: Some(bathrooms),
        city: "Ndola".to_string(),
        area: Some(area.to_string()),
        address: Some(address.to_string()),
        owner_name: Some("Agent Smith".to_string()),
        owner_email: Some("agent@example.com".to_string()),
        owner_phone: Some("+260971234567".to_string()),
        latitude: Some(lat),
        longitude: Some(lon),
        thumbnail_url: None,
        source: None,
        source_url: None,
        scraped_at: None,
    };

    vec![
        agent(
            "Modern 3BR Apartment",
            "Spacious 3-bedroom apartment near Levy Mall with parking and security.",
            6_500,
            ListingKind::Rent,
            3,
            2,
            "Town Centre",
            "Levy Junction, Ndola",
            -12.9667,
            28.6333,
        ),
        agent(
            "Family House with Garden",
            "Beautiful 4-bedroom house with a large garden in Kansenshi.",
            1_800_000,
            ListingKind::Sale,
            4,
            3,
            "Kansenshi",
            "Plot 1234, Kansenshi",
            -12.9900,
            28.6500,
        ),
        agent(
            "Studio Near CBD",
            "Affordable studio apartment ideal for young professionals.",
            3_500,
            ListingKind::Rent,
            1,
            1,
            "Masala",
            "Masala Road, Ndola",
            -12.9700,
            28.6400,
        ),
    ]
}
