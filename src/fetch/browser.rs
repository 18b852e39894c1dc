// src/fetch/browser.rs

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures_util::StreamExt;

use crate::fetch::{FetchError, PageFetcher};

/// Pause after navigation so client-side rendering can settle before the
/// document is captured.
const RENDER_SETTLE: Duration = Duration::from_millis(500);

/// Rendered-page retrieval through a headless Chromium session.
///
/// The public surface stays blocking like the rest of the fetch layer: a
/// private tokio runtime drives the CDP session, the same layering reqwest's
/// own blocking client uses. Each capture launches a fresh browser and tears
/// it down on every exit path, including capture errors.
pub struct BrowserFetcher {
    runtime: tokio::runtime::Runtime,
    timeout: Duration,
}

impl BrowserFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                FetchError::EnvironmentUnavailable(format!(
                    "could not start the async runtime for the browser session: {e}"
                ))
            })?;

        Ok(Self { runtime, timeout })
    }
}

impl PageFetcher for BrowserFetcher {
    fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        self.runtime.block_on(capture_rendered_page(url, self.timeout))
    }
}

async fn capture_rendered_page(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let config = BrowserConfig::builder()
        .request_timeout(timeout)
        .arg("--no-first-run")
        .arg("--disable-gpu")
        .arg("--disable-dev-shm-usage")
        .build()
        .map_err(FetchError::EnvironmentUnavailable)?;

    let (mut browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        FetchError::EnvironmentUnavailable(format!(
            "failed to launch headless Chromium ({e}); install Chromium or Google Chrome to \
             enable the rendered-page fallback"
        ))
    })?;

    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                eprintln!("⚠️ Browser handler error: {e}");
            }
        }
    });

    // Capture the outcome first so teardown runs on the error paths too.
    let result = match tokio::time::timeout(timeout, capture_content(&browser, url)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Network(format!(
            "browser capture of {url} timed out after {}s",
            timeout.as_secs()
        ))),
    };

    if let Err(e) = browser.close().await {
        eprintln!("⚠️ Browser close failed: {e}");
    }
    if let Err(e) = browser.wait().await {
        eprintln!("⚠️ Browser did not exit cleanly: {e}");
    }
    handler_task.abort();

    result
}

async fn capture_content(browser: &Browser, url: &str) -> Result<String, FetchError> {
    let page = browser
        .new_page(url)
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    // wait_for_navigation can outlive the load event on already-settled
    // pages; a short bounded wait is enough before the settle pause.
    match tokio::time::timeout(Duration::from_secs(5), page.wait_for_navigation()).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => eprintln!("⚠️ Navigation wait error (continuing): {e}"),
        Err(_) => eprintln!("⚠️ Navigation wait timed out (continuing)"),
    }
    tokio::time::sleep(RENDER_SETTLE).await;

    page.content()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))
}
