//! Scripted stand-ins for the browser seam. Everything answers instantly, so
//! state-machine tests never sleep through real wait budgets.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

use super::traits::{UiBackend, UiSession};
use super::types::{Locator, UiError};

fn key(target: &Locator) -> String {
    format!("{}|{}", target.css, target.text.as_deref().unwrap_or(""))
}

/// Hands out pre-scripted sessions in order, one per scan iteration. Running
/// out of sessions fails the next start, which is itself useful for scripting
/// fatal paths.
#[derive(Default)]
pub struct FakeBackend {
    sessions: RefCell<VecDeque<FakeSession>>,
}

impl FakeBackend {
    pub fn new(sessions: Vec<FakeSession>) -> Self {
        Self {
            sessions: RefCell::new(sessions.into()),
        }
    }
}

impl UiBackend for FakeBackend {
    type Session = FakeSession;

    fn start(&self) -> Result<FakeSession, UiError> {
        self.sessions
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| UiError::Session("no scripted session left".to_string()))
    }
}

/// One scripted page.
///
/// Locators registered through `show`, `add_text` or `set_list` are present;
/// everything else times out immediately. `show_after_refreshes` and
/// `show_after_misses` stage elements that appear later.
#[derive(Default)]
pub struct FakeSession {
    present: RefCell<HashSet<String>>,
    texts: RefCell<HashMap<String, VecDeque<String>>>,
    lists: RefCell<HashMap<String, Vec<String>>>,
    appears_at_refresh: RefCell<HashMap<String, u32>>,
    appears_after_misses: RefCell<HashMap<String, u32>>,
    pub refreshes: Cell<u32>,
    pub clicks: RefCell<Vec<String>>,
    pub opened: RefCell<Vec<String>>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the locator present: waits, probes and clicks on it succeed.
    pub fn show(&self, target: &Locator) -> &Self {
        self.present.borrow_mut().insert(key(target));
        self
    }

    /// Script a `text_of` answer. Successive calls stage successive reads;
    /// the final entry then answers every later read.
    pub fn add_text(&self, target: &Locator, text: &str) -> &Self {
        self.texts
            .borrow_mut()
            .entry(key(target))
            .or_default()
            .push_back(text.to_string());
        self
    }

    /// Script the `texts_of` answer for a locator.
    pub fn set_list(&self, target: &Locator, texts: &[&str]) -> &Self {
        self.lists
            .borrow_mut()
            .insert(key(target), texts.iter().map(|text| text.to_string()).collect());
        self
    }

    /// The locator only becomes present once `refresh` has run this many
    /// times.
    pub fn show_after_refreshes(&self, target: &Locator, needed: u32) -> &Self {
        self.appears_at_refresh.borrow_mut().insert(key(target), needed);
        self
    }

    /// The locator stays absent for this many lookups, then turns present.
    pub fn show_after_misses(&self, target: &Locator, misses: u32) -> &Self {
        self.appears_after_misses.borrow_mut().insert(key(target), misses);
        self
    }

    pub fn clicked(&self, target: &Locator) -> bool {
        self.clicks.borrow().iter().any(|k| k == &key(target))
    }

    fn is_present(&self, target: &Locator) -> bool {
        let k = key(target);
        if let Some(needed) = self.appears_at_refresh.borrow().get(&k) {
            return self.refreshes.get() >= *needed;
        }
        if let Some(left) = self.appears_after_misses.borrow_mut().get_mut(&k) {
            if *left > 0 {
                *left -= 1;
                return false;
            }
            return true;
        }
        self.present.borrow().contains(&k)
            || self.texts.borrow().contains_key(&k)
            || self.lists.borrow().contains_key(&k)
    }
}

impl UiSession for FakeSession {
    fn open(&self, url: &str) -> Result<(), UiError> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn refresh(&self) -> Result<(), UiError> {
        self.refreshes.set(self.refreshes.get() + 1);
        Ok(())
    }

    fn wait_for(&self, target: &Locator, budget: Duration) -> Result<(), UiError> {
        if self.is_present(target) {
            Ok(())
        } else {
            Err(UiError::Timeout {
                locator: target.clone(),
                budget,
            })
        }
    }

    fn click(&self, target: &Locator, budget: Duration) -> Result<(), UiError> {
        self.wait_for(target, budget)?;
        self.clicks.borrow_mut().push(key(target));
        Ok(())
    }

    fn text_of(&self, target: &Locator, budget: Duration) -> Result<String, UiError> {
        let k = key(target);
        if let Some(queue) = self.texts.borrow_mut().get_mut(&k) {
            if queue.len() > 1 {
                return Ok(queue.pop_front().unwrap());
            }
            if let Some(last) = queue.front() {
                return Ok(last.clone());
            }
        }
        if let Some(first) = self.lists.borrow().get(&k).and_then(|list| list.first()) {
            return Ok(first.clone());
        }
        Err(UiError::Timeout {
            locator: target.clone(),
            budget,
        })
    }

    fn texts_of(&self, target: &Locator) -> Result<Vec<String>, UiError> {
        Ok(self.lists.borrow().get(&key(target)).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_records_the_url() {
        let ui = FakeSession::new();
        ui.open("https://example.test/en").unwrap();
        assert_eq!(*ui.opened.borrow(), vec!["https://example.test/en".to_string()]);
    }

    #[test]
    fn staged_texts_advance_then_stick() {
        let ui = FakeSession::new();
        let label = Locator::css("div.month");
        ui.add_text(&label, "August").add_text(&label, "September");
        let budget = Duration::from_secs(1);
        assert_eq!(ui.text_of(&label, budget).unwrap(), "August");
        assert_eq!(ui.text_of(&label, budget).unwrap(), "September");
        assert_eq!(ui.text_of(&label, budget).unwrap(), "September");
    }

    #[test]
    fn misses_run_out_and_the_element_appears() {
        let ui = FakeSession::new();
        let banner = Locator::css("div.unavailable-title");
        ui.show_after_misses(&banner, 1);
        let budget = Duration::from_secs(1);
        assert!(!ui.probe(&banner, budget));
        assert!(ui.probe(&banner, budget));
    }

    #[test]
    fn refresh_gates_staged_elements() {
        let ui = FakeSession::new();
        let button = Locator::text("button", "RESERVE");
        ui.show_after_refreshes(&button, 2);
        let budget = Duration::from_secs(1);
        assert!(ui.click(&button, budget).is_err());
        ui.refresh().unwrap();
        assert!(ui.click(&button, budget).is_err());
        ui.refresh().unwrap();
        assert!(ui.click(&button, budget).is_ok());
        assert!(ui.clicked(&button));
    }
}
