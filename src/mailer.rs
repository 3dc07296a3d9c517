// src/mailer.rs

use reqwest::blocking::Client;
use serde::Serialize;
use std::error::Error;
use std::fmt;

use crate::config::MailerConfig;
use crate::db::contacts::ContactMessage;

const BREVO_ENDPOINT: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug)]
pub enum MailerError {
    RequestFailed(String),
    ApiError(String),
}

impl fmt::Display for MailerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailerError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            MailerError::ApiError(msg) => write!(f, "API error: {}", msg),
        }
    }
}

impl Error for MailerError {}

/// Relays contact-form submissions to the site owner through Brevo's
/// transactional email API.
pub struct ContactMailer {
    cfg: MailerConfig,
    client: Client,
}

#[derive(Serialize)]
struct BrevoAddress<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct BrevoRecipient<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoPayload<'a> {
    sender: BrevoAddress<'a>,
    to: Vec<BrevoRecipient<'a>>,
    reply_to: BrevoRecipient<'a>,
    subject: String,
    html_content: String,
}

impl ContactMailer {
    pub fn new(cfg: MailerConfig) -> Self {
        Self {
            cfg,
            client: Client::new(),
        }
    }

    /// Subject switches to a property-inquiry form when the submission was
    /// made from a listing page.
    pub fn subject_for(site_name: &str, msg: &ContactMessage) -> String {
        match msg.listing_id {
            Some(id) => format!("Property Inquiry - {site_name} (Listing #{id})"),
            None => format!("New Contact Form Submission - {site_name}"),
        }
    }

    fn html_body(msg: &ContactMessage) -> String {
        let mut html = format!(
            "<h2>New Contact Form Submission</h2>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>",
            msg.name, msg.email
        );
        if let Some(phone) = msg.phone.as_deref() {
            html.push_str(&format!("<p><strong>Phone:</strong> {phone}</p>"));
        }
        html.push_str(&format!(
            "<p><strong>Message:</strong></p><p>{}</p>",
            msg.message.replace('\n', "<br>")
        ));
        if let Some(id) = msg.listing_id {
            html.push_str(&format!("<p><strong>Property ID:</strong> {id}</p>"));
        }
        html
    }

    /// Send the relay email. Replies go straight to the submitter.
    pub fn send_contact_notification(
        &self,
        site_name: &str,
        msg: &ContactMessage,
    ) -> Result<(), MailerError> {
        let payload = BrevoPayload {
            sender: BrevoAddress {
                name: &self.cfg.sender_name,
                email: &self.cfg.sender_email,
            },
            to: vec![BrevoRecipient {
                email: &self.cfg.recipient_email,
            }],
            reply_to: BrevoRecipient { email: &msg.email },
            subject: Self::subject_for(site_name, msg),
            html_content: Self::html_body(msg),
        };

        let resp = self
            .client
            .post(BREVO_ENDPOINT)
            .header("api-key", &self.cfg.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(MailerError::ApiError(format!("{status} - {body}")));
        }

        Ok(())
    }
}
