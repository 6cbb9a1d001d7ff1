//! The date-window scan loop: one fresh browser session per stay, one
//! checkpoint after every iteration.

use tracing::{debug, error, info, warn};

use crate::models::{days_in_month, MonthCode, ResultSet, Stay, StayOutcome};
use crate::store::{ResultStore, StoreError};

use super::jumeirah::availability::{check_unavailable, request_results};
use super::jumeirah::calendar::{locate_month, select_day, CalendarError};
use super::jumeirah::prepare::{prepare, MAX_PREPARE_ATTEMPTS};
use super::jumeirah::rooms::extract;
use super::jumeirah::UNAVAILABLE_PROBE_WAIT;
use super::traits::{UiBackend, UiSession};
use super::types::{ParamsError, ScanParams, UiError};

/// A condition that ends the whole run. Everything softer degrades into a
/// logged, recorded outcome and the scan moves on.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("invalid scan parameters: {0}")]
    Params(#[from] ParamsError),
    #[error("browser session could not be started: {0}")]
    Session(UiError),
    #[error("search session still failing after {attempts} attempts: {last}")]
    PrepareRetriesExhausted { attempts: u32, last: UiError },
    #[error("calendar navigation failed: {0}")]
    Calendar(#[from] CalendarError),
    #[error("could not checkpoint results: {0}")]
    Store(#[from] StoreError),
}

/// Walks the configured day window, scanning one single-night stay per
/// iteration and folding each outcome into the result set.
pub struct DateWindowDriver<B: UiBackend> {
    backend: B,
    params: ScanParams,
    store: ResultStore,
    results: ResultSet,
}

impl<B: UiBackend> DateWindowDriver<B> {
    pub fn new(backend: B, params: ScanParams, store: ResultStore) -> Result<Self, RunError> {
        params.validate()?;
        Ok(Self {
            backend,
            params,
            store,
            results: ResultSet::new(),
        })
    }

    /// Run the whole window and return the accumulated results. The same
    /// data has already been checkpointed after each iteration, so a fatal
    /// error still leaves every completed stay on disk.
    pub fn run(mut self) -> Result<ResultSet, RunError> {
        let mut cursor = DateCursor::new(&self.params);
        info!(
            start_day = self.params.start_day,
            days = self.params.days_to_scan,
            month = %self.params.start_month,
            year = self.params.year,
            "starting date-window scan"
        );

        while !cursor.is_done() {
            let stay = cursor.stay();
            let key = stay.key();
            info!(key = %key, remaining = cursor.remaining(), "scanning stay");

            let session = self.backend.start().map_err(RunError::Session)?;
            let outcome = self.scan_stay(&session, stay);
            // The session ends with its iteration on every path, fatal ones
            // included.
            drop(session);
            let outcome = outcome?;

            match &outcome {
                StayOutcome::Unavailable { description } => {
                    info!(key = %key, description = %description, "stay unavailable");
                }
                StayOutcome::Available { offers } => {
                    info!(key = %key, offers = offers.len(), "stay available");
                }
            }
            self.results.insert(key, outcome);
            self.store.checkpoint(&self.results)?;
            cursor.advance();
        }

        info!(stays = self.results.len(), "date-window scan complete");
        Ok(self.results)
    }

    /// One full iteration against a fresh session: prepare the page, seek
    /// the month, select both days, resolve the outcome.
    fn scan_stay<S: UiSession>(&self, ui: &S, stay: Stay) -> Result<StayOutcome, RunError> {
        ui.open(&self.params.start_url).map_err(RunError::Session)?;
        self.prepare_with_retries(ui)?;

        locate_month(ui, stay.month)?;
        select_day(ui, stay.check_in);
        select_day(ui, stay.check_out);

        if let Some(description) = check_unavailable(ui, UNAVAILABLE_PROBE_WAIT) {
            return Ok(StayOutcome::Unavailable { description });
        }

        request_results(ui);
        match extract(ui) {
            Ok(offers) => Ok(StayOutcome::Available { offers }),
            Err(err) => {
                // The unavailable dialog can render late, after the results
                // request. Re-check before writing the stay off.
                warn!(%err, "room extraction failed, re-checking availability");
                match check_unavailable(ui, UNAVAILABLE_PROBE_WAIT) {
                    Some(description) => Ok(StayOutcome::Unavailable { description }),
                    None => {
                        warn!("extraction unrecoverable, recording stay with no offers");
                        Ok(StayOutcome::Available { offers: Vec::new() })
                    }
                }
            }
        }
    }

    /// Bounded retry loop around page preparation: refresh between attempts,
    /// fail the whole run at the cap.
    fn prepare_with_retries<S: UiSession>(&self, ui: &S) -> Result<(), RunError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match prepare(ui, &self.params.property_name) {
                Ok(()) => return Ok(()),
                Err(err) if attempt >= MAX_PREPARE_ATTEMPTS => {
                    error!(attempts = attempt, "page preparation retries exhausted, aborting run");
                    return Err(RunError::PrepareRetriesExhausted {
                        attempts: attempt,
                        last: err,
                    });
                }
                Err(err) => {
                    warn!(attempt, max = MAX_PREPARE_ATTEMPTS, %err, "page preparation failed, refreshing");
                    if let Err(refresh_err) = ui.refresh() {
                        warn!(%refresh_err, "page refresh failed before retry");
                    }
                }
            }
        }
    }
}

/// Day/month/year position of the scan window, advanced once per iteration.
#[derive(Debug, Clone, Copy)]
struct DateCursor {
    day: u32,
    month: MonthCode,
    year: i32,
    remaining: u32,
}

impl DateCursor {
    fn new(params: &ScanParams) -> Self {
        Self {
            day: params.start_day,
            month: params.start_month,
            year: params.year,
            remaining: params.days_to_scan,
        }
    }

    fn is_done(&self) -> bool {
        self.remaining == 0
    }

    fn remaining(&self) -> u32 {
        self.remaining
    }

    /// The stay this iteration scans: check-out is the next day, wrapping
    /// past month end.
    fn stay(&self) -> Stay {
        let mut check_out = self.day + 1;
        if check_out > days_in_month(self.year, self.month) {
            check_out = 1;
        }
        Stay {
            check_in: self.day,
            check_out,
            month: self.month,
        }
    }

    /// Move to the next check-in day, rolling the month when the day runs
    /// off its end and the year when December rolls over.
    fn advance(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
        self.day += 1;
        if self.day > days_in_month(self.year, self.month) {
            self.day = 1;
            if self.month.is_december() {
                self.year += 1;
            }
            self.month = self.month.next();
            debug!(month = %self.month, year = self.year, "scan window rolled into a new month");
        }
    }
}
