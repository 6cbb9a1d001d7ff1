use std::time::Duration;

use super::types::{Locator, UiError};

/// One live browser session on the booking site.
///
/// This is the whole surface the scan engine needs from a browser: navigate,
/// reload, bounded waits, presence probes, clicks, and text reads. Locators
/// are opaque here; implementations decide how one resolves to elements.
pub trait UiSession {
    /// Navigate this session to the given URL and wait for the load.
    fn open(&self, url: &str) -> Result<(), UiError>;

    /// Reload the current page.
    fn refresh(&self) -> Result<(), UiError>;

    /// Block until at least one element matches, or time out loudly.
    fn wait_for(&self, target: &Locator, budget: Duration) -> Result<(), UiError>;

    /// Soft presence check: true when a match shows up within the budget.
    ///
    /// For optional page affordances where absence is an answer, not an
    /// error. Callers that need the element must use `wait_for` instead.
    fn probe(&self, target: &Locator, budget: Duration) -> bool {
        self.wait_for(target, budget).is_ok()
    }

    /// Wait until a matching element accepts a click, then click it.
    fn click(&self, target: &Locator, budget: Duration) -> Result<(), UiError>;

    /// Text of the first match, waiting up to the budget for one to appear.
    fn text_of(&self, target: &Locator, budget: Duration) -> Result<String, UiError>;

    /// Trimmed texts of every match, in page order, read immediately.
    fn texts_of(&self, target: &Locator) -> Result<Vec<String>, UiError>;
}

/// Mints browser sessions, one per scan iteration.
pub trait UiBackend {
    type Session: UiSession;

    /// Start a fresh, isolated session. Dropping the session releases it.
    fn start(&self) -> Result<Self::Session, UiError>;
}
