// src/domain/listing.rs

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Date format used by the source site, kept everywhere we print or export
/// a date.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One parsed auction notice, flattened and normalized.
///
/// Created by the parser from a single page fragment, enriched in place with
/// a `zone` by the resolver, read-only afterwards. Field order is also the
/// CSV column order and the JSON key order.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct Listing {
    pub address: String,
    pub zone: Option<String>,
    pub property_type: String,
    #[serde(serialize_with = "serialize_dmy")]
    pub auction_date: Option<NaiveDate>,
    pub base_price: Option<f64>,
    pub tribunal: String,
    pub reference: String,
    pub url: String,
    pub description: String,
}

impl Listing {
    /// Auction date as printed in exports; empty when absent.
    pub fn date_string(&self) -> String {
        self.auction_date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Base price with two decimals as printed in exports; empty when absent.
    pub fn price_string(&self) -> String {
        self.base_price
            .map(|p| format!("{p:.2}"))
            .unwrap_or_default()
    }
}

/// Serialize an optional date as a dd/mm/yyyy string so JSON and CSV agree.
fn serialize_dmy<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(d) => serializer.serialize_some(&d.format(DATE_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}
