// src/export/export_csv.rs

use std::path::Path;

use crate::domain::Listing;
use crate::export::ExportError;

/// Column order is fixed; it matches the Listing field order and the JSON
/// key order.
const HEADERS: [&str; 9] = [
    "address",
    "zone",
    "property_type",
    "auction_date",
    "base_price",
    "tribunal",
    "reference",
    "url",
    "description",
];

pub fn write_csv(listings: &[Listing], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| ExportError::Io(e.to_string()))?;

    writer
        .write_record(HEADERS)
        .map_err(|e| ExportError::Io(e.to_string()))?;

    for listing in listings {
        let auction_date = listing.date_string();
        let base_price = listing.price_string();

        writer
            .write_record([
                listing.address.as_str(),
                listing.zone.as_deref().unwrap_or(""),
                listing.property_type.as_str(),
                auction_date.as_str(),
                base_price.as_str(),
                listing.tribunal.as_str(),
                listing.reference.as_str(),
                listing.url.as_str(),
                listing.description.as_str(),
            ])
            .map_err(|e| ExportError::Io(e.to_string()))?;
    }

    writer.flush().map_err(|e| ExportError::Io(e.to_string()))?;
    Ok(())
}
