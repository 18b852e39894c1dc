// src/parse/listing_parser.rs

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::{Listing, DATE_FORMAT};
use crate::parse::Fragment;

/// Outcome of parsing one fragment: a listing, or the reason it was skipped.
/// Skips are recovered locally by the caller; they never abort a run.
#[derive(Debug)]
pub enum FragmentOutcome {
    Listing(Box<Listing>),
    Skip(String),
}

/// Extracts listing fields from notice fragments.
///
/// The label patterns are compiled once here and reused for every fragment
/// of the run. Extraction is tolerant: a missing label leaves its field
/// absent or empty rather than failing the fragment.
pub struct ListingParser {
    price: Regex,
    auction_date: Regex,
    property_type: Regex,
    tribunal: Regex,
    reference: Regex,
}

impl ListingParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            price: Regex::new(r"Prezzo:\s*([\d.,]+)\s*€")?,
            auction_date: Regex::new(r"Data asta:\s*(\d{2}/\d{2}/\d{4})")?,
            property_type: Regex::new(r"Tipologia:\s*([^-]+)")?,
            tribunal: Regex::new(r"Tribunale di ([^-]+)")?,
            reference: Regex::new(r"Rif\. #(\w+)")?,
        })
    }

    pub fn parse(&self, fragment: &Fragment) -> FragmentOutcome {
        if fragment.title.trim().is_empty() && fragment.link.trim().is_empty() {
            return FragmentOutcome::Skip(
                "fragment carries neither a title nor a link".to_string(),
            );
        }

        let listing = Listing {
            address: extract_address(&fragment.title),
            zone: None,
            property_type: self.extract_property_type(&fragment.body),
            auction_date: self.extract_auction_date(&fragment.body),
            base_price: self.extract_price(&fragment.body),
            tribunal: self.extract_tribunal(&fragment.title),
            reference: self.extract_reference(&fragment.title),
            url: fragment.link.trim().to_string(),
            description: extract_description(&fragment.body),
        };

        FragmentOutcome::Listing(Box::new(listing))
    }

    /// Price from text like "Prezzo: 70.000,00 €", normalized from the
    /// Italian format. Unparseable or negative amounts are absent.
    fn extract_price(&self, text: &str) -> Option<f64> {
        let captured = self.price.captures(text)?;
        parse_italian_amount(captured.get(1)?.as_str())
    }

    /// Date from text like "Data asta: 17/03/2026 - 12:00". A matched string
    /// that is not a real calendar date is absent.
    fn extract_auction_date(&self, text: &str) -> Option<NaiveDate> {
        let captured = self.auction_date.captures(text)?;
        NaiveDate::parse_from_str(captured.get(1)?.as_str(), DATE_FORMAT).ok()
    }

    fn extract_property_type(&self, text: &str) -> String {
        self.property_type
            .captures(text)
            .and_then(|captured| captured.get(1))
            .map(|field| field.as_str().trim().to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    fn extract_tribunal(&self, title: &str) -> String {
        self.tribunal
            .captures(title)
            .and_then(|captured| captured.get(1))
            .map(|field| format!("Tribunale di {}", field.as_str().trim()))
            .unwrap_or_default()
    }

    fn extract_reference(&self, title: &str) -> String {
        self.reference
            .captures(title)
            .and_then(|captured| captured.get(1))
            .map(|field| field.as_str().to_string())
            .unwrap_or_default()
    }
}

/// Address is the notice title up to the lot marker.
fn extract_address(title: &str) -> String {
    title.split(" - Lotto").next().unwrap_or(title).trim().to_string()
}

/// Description is the body up to the property-type label.
fn extract_description(body: &str) -> String {
    body.split(" - Tipologia:").next().unwrap_or(body).trim().to_string()
}

/// Normalize an Italian-formatted amount: "70.000,00" -> 70000.00.
fn parse_italian_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.replace('.', "").replace(',', ".");
    let value = cleaned.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value)
}
