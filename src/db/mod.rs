pub mod connection;
pub mod contacts;
pub mod listings;
pub mod media;
pub mod users;

pub use connection::{init_db, Database};
