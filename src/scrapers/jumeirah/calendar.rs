//! Month navigation and day selection on the booking calendar.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::models::MonthCode;
use crate::scrapers::traits::UiSession;
use crate::scrapers::types::UiError;

use super::{day_cell, month_label, next_month_control};
use super::{DAY_CELL_WAIT, MONTH_LABEL_WAIT, MONTH_SEEK_DEADLINE, STEP_WAIT};

/// One full cycle of the picker; past this the month cannot exist.
pub(crate) const MAX_MONTH_STEPS: u32 = 12;

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("month picker never became readable: {0}")]
    Ui(#[from] UiError),
    #[error("month {target} not reached after {steps} calendar advances")]
    NotFound { target: MonthCode, steps: u32 },
}

/// Page the calendar forward until it shows `target`.
///
/// Bounded two ways: at most one full year of advances, and a wall-clock
/// deadline over the whole seek. Either bound expiring fails the run rather
/// than clicking forever.
pub fn locate_month<S: UiSession>(ui: &S, target: MonthCode) -> Result<(), CalendarError> {
    let deadline = Instant::now() + MONTH_SEEK_DEADLINE;
    let mut steps = 0;
    loop {
        let label = ui.text_of(&month_label(), MONTH_LABEL_WAIT)?;
        let name = label.split_whitespace().next().unwrap_or_default();
        match MonthCode::from_label(name) {
            Some(shown) if shown == target => {
                info!(%target, steps, "calendar reached target month");
                return Ok(());
            }
            Some(shown) => debug!(%shown, %target, "month mismatch, advancing"),
            None => warn!(label = %label, "unreadable month label, advancing"),
        }
        if steps >= MAX_MONTH_STEPS || Instant::now() >= deadline {
            return Err(CalendarError::NotFound { target, steps });
        }
        ui.click(&next_month_control(), STEP_WAIT)?;
        steps += 1;
    }
}

/// Click the calendar cell for `day`.
///
/// Soft on purpose: a missed click is logged and the scan carries on, letting
/// the availability check surface anything real.
pub fn select_day<S: UiSession>(ui: &S, day: u32) -> bool {
    match ui.click(&day_cell(day), DAY_CELL_WAIT) {
        Ok(()) => {
            info!(day, "selected calendar day");
            true
        }
        Err(err) => {
            warn!(day, %err, "calendar day not clickable");
            false
        }
    }
}
