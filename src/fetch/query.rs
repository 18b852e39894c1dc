// src/fetch/query.rs

use url::Url;

pub const BASE_URL: &str = "https://www.astalegale.net";

const FEED_URL: &str = "https://www.astalegale.net/Immobili/Rss";
const SEARCH_URL: &str = "https://www.astalegale.net/Immobili";

/// The source-site query for one run. Only the city reaches the site; budget
/// and date window are not feed parameters and are enforced by the filter
/// stage instead.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    city: String,
}

impl SearchQuery {
    pub fn new(city: &str) -> Self {
        Self {
            city: city.trim().to_lowercase(),
        }
    }

    /// Feed URL for one result page. Page 1 carries no page parameter.
    pub fn feed_url(&self, page: u32) -> String {
        let mut url = match Url::parse_with_params(FEED_URL, self.filter_params()) {
            Ok(url) => url,
            Err(_) => return FEED_URL.to_string(),
        };
        if page > 1 {
            url.query_pairs_mut().append_pair("page", &page.to_string());
        }
        url.to_string()
    }

    /// Search-page URL with the same filters, for the rendered capture.
    pub fn search_url(&self) -> String {
        match Url::parse_with_params(SEARCH_URL, self.filter_params()) {
            Ok(url) => url.to_string(),
            Err(_) => SEARCH_URL.to_string(),
        }
    }

    fn filter_params(&self) -> [(&'static str, &str); 4] {
        [
            ("categories", "residenziali"),
            ("regioni", "piemonte"),
            ("province", "to"),
            ("comuni", self.city.as_str()),
        ]
    }
}
