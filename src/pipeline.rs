// src/pipeline.rs

use std::time::Duration;

use chrono::{Local, NaiveDate};

use crate::cli::Cli;
use crate::domain::{Criteria, Listing, DATE_FORMAT};
use crate::errors::RunError;
use crate::export::{export_listings, ExportFormat};
use crate::fetch::{fetch_listing_pages, FetchOptions, SearchQuery};
use crate::parse::{split_fragments, FragmentOutcome, ListingParser};
use crate::zones;

/// What a completed run produced, for the closing log line.
#[derive(Debug)]
pub struct RunSummary {
    pub parsed: usize,
    pub kept: usize,
    pub format: ExportFormat,
}

/// Run the whole pipeline once:
/// fetch -> fragment -> parse -> enrich -> filter -> sort -> print -> export.
///
/// Pages are consumed as they arrive: each one is fragmented, parsed and
/// filtered before the fetcher requests the next. Fragment-level problems
/// are logged and skipped; fetch and export failures abort with a
/// stage-tagged error. Zero matching listings is a success and still writes
/// a valid, empty-bodied file.
pub fn run(args: &Cli) -> Result<RunSummary, RunError> {
    let today = Local::now().date_naive();
    let criteria = Criteria::new(args.budget, &args.city, args.months, today);
    let query = SearchQuery::new(&args.city);
    let options = FetchOptions {
        timeout: Duration::from_secs(args.timeout),
        use_browser_fallback: !args.no_browser,
    };
    let parser = ListingParser::new().map_err(|e| RunError::Parse(e.to_string()))?;

    print_banner(&criteria);

    let mut listings = Vec::new();
    let mut parsed = 0usize;
    let mut page_no = 0usize;
    fetch_listing_pages(&query, &options, |page| {
        page_no += 1;
        let fragments = split_fragments(page);
        eprintln!("✅ Page {page_no} parsed ({} fragments)", fragments.len());

        for fragment in fragments {
            match parser.parse(&fragment) {
                FragmentOutcome::Listing(listing) => {
                    parsed += 1;
                    let mut listing = *listing;
                    listing.zone = zones::resolve(criteria.city(), &listing.address);
                    if criteria.matches(&listing) {
                        listings.push(listing);
                    }
                }
                FragmentOutcome::Skip(reason) => {
                    eprintln!("⚠️ Skipped a fragment: {reason}");
                }
            }
        }
    })
    .map_err(RunError::Fetch)?;

    eprintln!("Found {} listings, {} matching criteria", parsed, listings.len());

    // Soonest auction first. Every survivor carries a date, but the
    // comparator tolerates an absent one anyway.
    listings.sort_by_key(|listing| listing.auction_date.unwrap_or(NaiveDate::MAX));

    print_results(&listings, &criteria, args.months);

    let format = export_listings(&listings, &args.output).map_err(RunError::Export)?;
    println!("\nResults saved to {}", args.output.display());

    Ok(RunSummary {
        parsed,
        kept: listings.len(),
        format,
    })
}

fn print_banner(criteria: &Criteria) {
    println!("Scraping apartments in {}", title_case(criteria.city()));
    println!("Max budget: €{:.2}", criteria.max_budget);
    println!(
        "Auction date range: now to {}",
        criteria.window_end.format(DATE_FORMAT)
    );
    println!("{}", "-".repeat(60));
}

fn print_results(listings: &[Listing], criteria: &Criteria, months_ahead: u32) {
    println!("\n{}", "=".repeat(60));
    println!(
        "RESULTS: {} apartments in {}",
        listings.len(),
        title_case(criteria.city())
    );
    println!("Budget: up to €{:.2}", criteria.max_budget);
    println!("Auctions within next {months_ahead} months");
    println!("{}", "=".repeat(60));

    if listings.is_empty() {
        println!("\nNo apartments matching your criteria were found.");
        return;
    }

    for (i, listing) in listings.iter().enumerate() {
        println!("\n[{}] {}", i + 1, listing.address);
        if let Some(zone) = &listing.zone {
            println!("    Zone: {zone}");
        }
        println!("    Type: {}", listing.property_type);
        if listing.auction_date.is_some() {
            println!("    Auction Date: {}", listing.date_string());
        }
        if listing.base_price.is_some() {
            println!("    Base Price: €{}", listing.price_string());
        }
        if !listing.tribunal.is_empty() {
            println!("    {}", listing.tribunal);
        }
        if !listing.reference.is_empty() {
            println!("    Ref: {}", listing.reference);
        }
        println!("    URL: {}", listing.url);
    }
}

fn title_case(city: &str) -> String {
    let mut chars = city.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
