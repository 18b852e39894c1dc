mod fragments;
mod listing_parser;

pub use fragments::{page_has_listings, page_is_feed, split_fragments, Fragment};
pub use listing_parser::{FragmentOutcome, ListingParser};
