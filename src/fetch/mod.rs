mod browser;
mod fetch_error;
mod http;
mod query;

pub use browser::BrowserFetcher;
pub use fetch_error::FetchError;
pub use http::HttpFetcher;
pub use query::{SearchQuery, BASE_URL};

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use crate::parse::{page_has_listings, page_is_feed};

/// Hard cap on feed pages fetched in one run.
const MAX_PAGES: u32 = 50;
/// Pause between successive feed page requests.
const PAGE_DELAY: Duration = Duration::from_secs(1);

/// One page-retrieval strategy: plain HTTP, or a rendered browser capture.
pub trait PageFetcher {
    fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetch knobs the CLI exposes.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub use_browser_fallback: bool,
}

/// Retrieve every raw page that may hold listings for `query`, handing each
/// page to `on_page` before the next request is issued.
///
/// The feed is fetched first over plain HTTP. When the first response
/// carries listing markers, the remaining feed pages are walked
/// sequentially. An item-less feed envelope is a successful query with zero
/// results: the run ends with no pages handed over, not an error. Only a
/// response that is no feed at all (the site served its client-rendered
/// shell instead) triggers a headless-browser capture of the search page,
/// attempted exactly once.
pub fn fetch_listing_pages<F>(
    query: &SearchQuery,
    options: &FetchOptions,
    on_page: F,
) -> Result<(), FetchError>
where
    F: FnMut(&str),
{
    let http = HttpFetcher::new(options.timeout)?;
    fetch_pages(&http, query, options, on_page)
}

/// Strategy decision step: paginate the feed, accept an empty feed as a
/// zero-result success, or capture the rendered page.
fn fetch_pages<F>(
    http: &dyn PageFetcher,
    query: &SearchQuery,
    options: &FetchOptions,
    mut on_page: F,
) -> Result<(), FetchError>
where
    F: FnMut(&str),
{
    let first_url = query.feed_url(1);
    eprintln!("📄 Fetching feed page 1: {first_url}");
    let first = http.fetch_page(&first_url)?;

    if page_has_listings(&first) {
        return paginate_feed(http, query, first, on_page);
    }
    if page_is_feed(&first) {
        eprintln!("🏁 Feed has no listings");
        return Ok(());
    }

    eprintln!("⚠️ Feed response carries no listing markers, falling back to a rendered capture");
    let rendered = fallback_capture(query, options)?;
    on_page(&rendered);
    Ok(())
}

/// Walk feed pages 2.. after a marker-bearing first page, stopping on the
/// first page without listings or on a page already seen. Every kept page is
/// handed over before the next one is requested.
fn paginate_feed<F>(
    fetcher: &dyn PageFetcher,
    query: &SearchQuery,
    first: String,
    mut on_page: F,
) -> Result<(), FetchError>
where
    F: FnMut(&str),
{
    let mut seen = HashSet::new();
    seen.insert(page_signature(&first));
    on_page(&first);

    for page in 2..=MAX_PAGES {
        std::thread::sleep(PAGE_DELAY);

        let url = query.feed_url(page);
        eprintln!("📄 Fetching feed page {page}: {url}");
        let body = fetcher.fetch_page(&url)?;

        if !page_has_listings(&body) {
            eprintln!("🏁 Page {page} has no listings, stopping");
            break;
        }
        if !seen.insert(page_signature(&body)) {
            eprintln!("🔁 Page {page} repeats an earlier page, stopping");
            break;
        }

        on_page(&body);
    }

    Ok(())
}

/// The browser-automation strategy, used at most once per query.
fn fallback_capture(query: &SearchQuery, options: &FetchOptions) -> Result<String, FetchError> {
    if !options.use_browser_fallback {
        return Err(FetchError::EnvironmentUnavailable(
            "the page needs client-side rendering and the browser fallback is disabled; \
             drop --no-browser to enable it"
                .to_string(),
        ));
    }

    let browser = BrowserFetcher::new(options.timeout)?;
    let search_url = query.search_url();
    eprintln!("📄 Capturing rendered page: {search_url}");
    browser.fetch_page(&search_url)
}

fn page_signature(body: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    hasher.finish()
}
