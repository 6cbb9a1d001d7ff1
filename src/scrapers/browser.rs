use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use headless_chrome::{Browser, LaunchOptions, Tab};
use scraper::{Html, Selector};
use tracing::{debug, info};

use super::traits::{UiBackend, UiSession};
use super::types::{Locator, UiError};

/// Poll cadence of the blocking wait primitives.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Launches one headless Chrome process per scan iteration.
pub struct ChromeBackend;

impl ChromeBackend {
    pub fn new() -> Self {
        Self
    }
}

impl UiBackend for ChromeBackend {
    type Session = ChromeSession;

    fn start(&self) -> Result<ChromeSession, UiError> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| UiError::Session(format!("failed to build launch options: {e}")))?;

        let browser =
            Browser::new(options).map_err(|e| UiError::Session(format!("failed to launch Chrome: {e}")))?;

        let tab = browser
            .new_tab()
            .map_err(|e| UiError::Session(format!("failed to open tab: {e}")))?;

        Ok(ChromeSession {
            _browser: browser,
            tab,
        })
    }
}

/// One tab in a dedicated Chrome process.
///
/// Reads go through a captured HTML snapshot parsed with `scraper`. Clicks go
/// through live DevTools elements so the page sees real interaction.
pub struct ChromeSession {
    // The Chrome process lives exactly as long as this handle.
    _browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    /// Capture the full page HTML for snapshot reads.
    fn page_html(&self) -> Result<String, UiError> {
        let result = self
            .tab
            .evaluate("document.documentElement.outerHTML", false)
            .map_err(|e| UiError::Session(format!("could not capture page HTML: {e}")))?;
        result
            .value
            .as_ref()
            .and_then(|value| value.as_str())
            .map(str::to_string)
            .ok_or_else(|| UiError::Session("page HTML evaluated to nothing".to_string()))
    }

    /// Trimmed texts of snapshot elements matching the locator.
    fn snapshot_texts(&self, target: &Locator) -> Result<Vec<String>, UiError> {
        let html = self.page_html()?;
        let document = Html::parse_document(&html);
        let selector = Selector::parse(&target.css)
            .map_err(|e| UiError::Session(format!("bad selector `{}`: {e}", target.css)))?;
        let texts = document
            .select(&selector)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|text| target.text.as_deref().map_or(true, |wanted| text == wanted))
            .collect();
        Ok(texts)
    }

    /// One live click attempt against the first matching element.
    fn try_click(&self, target: &Locator) -> bool {
        let Ok(elements) = self.tab.find_elements(&target.css) else {
            return false;
        };
        for element in elements {
            if let Some(wanted) = target.text.as_deref() {
                let matches = element
                    .get_inner_text()
                    .map(|text| text.trim() == wanted)
                    .unwrap_or(false);
                if !matches {
                    continue;
                }
            }
            if element.click().is_ok() {
                return true;
            }
        }
        false
    }

    /// Re-run `attempt` every poll tick until it yields or the budget runs
    /// out. Snapshot hiccups mid-wait count as "not yet", not as failures.
    fn poll_until<T>(
        &self,
        target: &Locator,
        budget: Duration,
        mut attempt: impl FnMut(&Self) -> Option<T>,
    ) -> Result<T, UiError> {
        let deadline = Instant::now() + budget;
        loop {
            if let Some(found) = attempt(self) {
                return Ok(found);
            }
            if Instant::now() >= deadline {
                return Err(UiError::Timeout {
                    locator: target.clone(),
                    budget,
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl UiSession for ChromeSession {
    fn open(&self, url: &str) -> Result<(), UiError> {
        debug!(url, "navigating");
        self.tab
            .navigate_to(url)
            .map_err(|e| UiError::Session(format!("navigation to {url} failed: {e}")))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| UiError::Session(format!("page never settled: {e}")))?;
        Ok(())
    }

    fn refresh(&self) -> Result<(), UiError> {
        debug!("refreshing page");
        self.tab
            .reload(true, None)
            .map_err(|e| UiError::Session(format!("reload failed: {e}")))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| UiError::Session(format!("page never settled after reload: {e}")))?;
        Ok(())
    }

    fn wait_for(&self, target: &Locator, budget: Duration) -> Result<(), UiError> {
        self.poll_until(target, budget, |session| {
            match session.snapshot_texts(target) {
                Ok(texts) if !texts.is_empty() => Some(()),
                _ => None,
            }
        })
    }

    fn click(&self, target: &Locator, budget: Duration) -> Result<(), UiError> {
        self.poll_until(target, budget, |session| session.try_click(target).then_some(()))?;
        debug!(%target, "clicked");
        Ok(())
    }

    fn text_of(&self, target: &Locator, budget: Duration) -> Result<String, UiError> {
        self.poll_until(target, budget, |session| {
            match session.snapshot_texts(target) {
                Ok(mut texts) if !texts.is_empty() => Some(texts.remove(0)),
                _ => None,
            }
        })
    }

    fn texts_of(&self, target: &Locator) -> Result<Vec<String>, UiError> {
        self.snapshot_texts(target)
    }
}
