// src/config.rs
use std::env;

/// Runtime configuration, read once at startup. Every setting has a
/// working default so a bare `cargo run` serves something useful.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db_file: String,
    pub site_name: String,
    pub mailer: Option<MailerConfig>,
}

/// Contact-relay settings. Absent entirely when no API key is configured;
/// the relay then logs and skips instead of failing requests.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: String,
    pub recipient_email: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let db_file = env::var("DB_FILE").unwrap_or_else(|_| "data/realestate.sqlite3".to_string());
        let site_name = env::var("SITE_NAME").unwrap_or_else(|_| "Ndola Homes".to_string());

        let mailer = env::var("BREVO_API_KEY").ok().map(|api_key| {
            let sender_email =
                env::var("EMAIL_FROM").unwrap_or_else(|_| "noreply@ndolahomes.example".to_string());
            MailerConfig {
                api_key,
                sender_name: env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| site_name.clone()),
                recipient_email: env::var("EMAIL_TO").unwrap_or_else(|_| sender_email.clone()),
                sender_email,
            }
        });

        Self {
            port,
            db_file,
            site_name,
            mailer,
        }
    }
}
