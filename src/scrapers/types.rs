use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::MonthCode;

/// Upper bound on the scan window; keeps a typo'd config from running for
/// decades.
pub const MAX_SCAN_DAYS: u32 = 10_000;

/// Where to find something on a page: a CSS selector, optionally narrowed to
/// elements whose trimmed text matches exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub css: String,
    pub text: Option<String>,
}

impl Locator {
    pub fn css(css: impl Into<String>) -> Self {
        Self {
            css: css.into(),
            text: None,
        }
    }

    pub fn text(css: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            css: css.into(),
            text: Some(text.into()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{} [text = {:?}]", self.css, text),
            None => f.write_str(&self.css),
        }
    }
}

/// Failures crossing the browser seam.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// Nothing matched the locator within its wait budget.
    #[error("timed out after {budget:?} waiting for {locator}")]
    Timeout { locator: Locator, budget: Duration },
    /// The session itself broke: launch, navigation, or protocol trouble.
    #[error("browser session error: {0}")]
    Session(String),
}

/// Rejected scan parameters.
#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error("days_to_scan must be at least 1")]
    EmptyWindow,
    #[error("days_to_scan must not exceed {}", MAX_SCAN_DAYS)]
    WindowTooLong,
    #[error("start_day {0} is not a calendar day")]
    BadStartDay(u32),
    #[error("year {0} is outside the supported range")]
    BadYear(i32),
}

/// Parameters for one scan run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanParams {
    /// Check-in day the window opens on
    pub start_day: u32,
    /// Number of consecutive single-night stays to scan
    pub days_to_scan: u32,
    /// Month the window opens in
    pub start_month: MonthCode,
    /// Year the window opens in; rolls forward over a December boundary
    pub year: i32,
    /// Property to pick from the search results
    pub property_name: String,
    /// Booking entry page
    pub start_url: String,
    /// Checkpoint destination
    pub output_path: PathBuf,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            start_day: 30,
            days_to_scan: 60,
            start_month: MonthCode::new(10).expect("static month code"),
            year: 2024,
            property_name: "Jumeirah Al Naseem".to_string(),
            start_url: "https://www.jumeirah.com/en".to_string(),
            output_path: PathBuf::from("output.json"),
        }
    }
}

impl ScanParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.days_to_scan == 0 {
            return Err(ParamsError::EmptyWindow);
        }
        if self.days_to_scan > MAX_SCAN_DAYS {
            return Err(ParamsError::WindowTooLong);
        }
        if !(1..=31).contains(&self.start_day) {
            return Err(ParamsError::BadStartDay(self.start_day));
        }
        if !(1..=9999).contains(&self.year) {
            return Err(ParamsError::BadYear(self.year));
        }
        Ok(())
    }

    /// Load parameters from a JSON file, falling back to the defaults when
    /// the file does not exist. A malformed file is an error, not a default.
    pub async fn load(path: &str) -> anyhow::Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => {
                let params: Self = serde_json::from_str(&raw)
                    .with_context(|| format!("malformed scan parameters in {path}"))?;
                info!("Loaded scan parameters from {path}");
                Ok(params)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!("No {path} found, using default scan parameters");
                Ok(Self::default())
            }
            Err(err) => Err(err).with_context(|| format!("could not read {path}")),
        }
    }
}
