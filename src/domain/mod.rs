// src/domain/mod.rs

mod criteria;
mod listing;

pub use criteria::Criteria;
pub use listing::{Listing, DATE_FORMAT};
