// src/domain/criteria.rs

use chrono::{Months, NaiveDate};

use crate::domain::listing::Listing;

/// The run's filtering criteria, fixed once at startup.
///
/// `today` is injected rather than read from the clock here so the window
/// rules stay testable.
#[derive(Debug, Clone)]
pub struct Criteria {
    pub max_budget: f64,
    city: String,
    pub today: NaiveDate,
    pub window_end: NaiveDate,
}

impl Criteria {
    pub fn new(max_budget: u64, city: &str, months_ahead: u32, today: NaiveDate) -> Self {
        let window_end = today
            .checked_add_months(Months::new(months_ahead))
            .unwrap_or(NaiveDate::MAX);

        Self {
            max_budget: max_budget as f64,
            city: city.trim().to_lowercase(),
            today,
            window_end,
        }
    }

    /// Requested city, lowercased.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// True iff the listing is confirmed inside the run's window and budget.
    ///
    /// A listing without an auction date cannot be confirmed in-window and is
    /// excluded; past auctions are always excluded, whatever the price. An
    /// absent price is unconstrained. Both window bounds and the budget bound
    /// are inclusive.
    pub fn matches(&self, listing: &Listing) -> bool {
        let date = match listing.auction_date {
            Some(d) => d,
            None => return false,
        };
        if date < self.today || date > self.window_end {
            return false;
        }

        if let Some(price) = listing.base_price {
            if price > self.max_budget {
                return false;
            }
        }

        // The notice title carries the comune name, so city matching is a
        // case-insensitive containment check on the address.
        listing.address.to_lowercase().contains(&self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torino_listing() -> Listing {
        Listing {
            address: "Via Nizza 45, Torino".to_string(),
            zone: None,
            property_type: "Abitazione di tipo civile".to_string(),
            auction_date: NaiveDate::from_ymd_opt(2026, 2, 10),
            base_price: Some(90000.0),
            tribunal: "Tribunale di Torino".to_string(),
            reference: "TO100".to_string(),
            url: "https://www.astalegale.net/t".to_string(),
            description: String::new(),
        }
    }

    fn criteria() -> Criteria {
        // Run date fixed at 2026-01-15, three months ahead -> 2026-04-15.
        Criteria::new(
            150_000,
            "torino",
            3,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        )
    }

    #[test]
    fn window_end_is_calendar_months_ahead() {
        let c = criteria();
        assert_eq!(c.window_end, NaiveDate::from_ymd_opt(2026, 4, 15).unwrap());
    }

    #[test]
    fn in_window_listing_matches() {
        assert!(criteria().matches(&torino_listing()));
    }

    #[test]
    fn yesterday_is_excluded_regardless_of_price() {
        let mut listing = torino_listing();
        listing.auction_date = NaiveDate::from_ymd_opt(2026, 1, 14);
        listing.base_price = Some(1.0);
        assert!(!criteria().matches(&listing));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let c = criteria();

        let mut listing = torino_listing();
        listing.auction_date = Some(c.today);
        assert!(c.matches(&listing));

        listing.auction_date = Some(c.window_end);
        assert!(c.matches(&listing));

        listing.auction_date = c.window_end.succ_opt();
        assert!(!c.matches(&listing));
    }

    #[test]
    fn budget_bound_is_inclusive() {
        let mut listing = torino_listing();

        listing.base_price = Some(200_000.0);
        assert!(!criteria().matches(&listing));

        listing.base_price = Some(150_000.0);
        assert!(criteria().matches(&listing));
    }

    #[test]
    fn absent_price_is_unconstrained_but_date_still_rules() {
        let mut listing = torino_listing();
        listing.base_price = None;
        assert!(criteria().matches(&listing));

        listing.auction_date = None;
        assert!(!criteria().matches(&listing));
    }

    #[test]
    fn city_match_is_case_insensitive_containment() {
        let c = Criteria::new(
            150_000,
            "TORINO",
            3,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        );
        assert!(c.matches(&torino_listing()));

        let mut elsewhere = torino_listing();
        elsewhere.address = "Via Dante 3, Milano".to_string();
        assert!(!c.matches(&elsewhere));
    }
}
