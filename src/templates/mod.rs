pub mod layout;
pub mod pages;

pub use pages::{admin_page, home_page, privacy_page, terms_page};
