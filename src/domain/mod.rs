pub mod listing;
pub mod query;

pub use listing::{
    Listing, ListingKind, ListingWithMedia, MediaDescriptor, MediaKind, NewListing, NewMedia,
    SearchPage,
};
pub use query::{BoundingBox, ListingQuery};
