mod auth_tests;
mod contact_tests;
mod listings_tests;
mod publish_tests;
