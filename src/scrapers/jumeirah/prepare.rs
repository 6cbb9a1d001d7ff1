//! The fixed page-transition sequence that makes the room calendar reachable.

use tracing::{debug, info, warn};

use crate::scrapers::traits::UiSession;
use crate::scrapers::types::UiError;

use super::{apply_filter_button, consent_allow, price_indicator, property_card, reserve_button,
    room_detail_toggle};
use super::{CONSENT_WAIT, DISMISS_WAIT, PRICE_CONFIRM_WAIT, STEP_WAIT};

/// Attempts the driver grants the whole sequence before failing the run.
pub(crate) const MAX_PREPARE_ATTEMPTS: u32 = 5;

/// Walk the page from the landing URL to an open room calendar.
///
/// Every error out of here is retryable: the caller refreshes the page and
/// runs the whole sequence again.
pub fn prepare<S: UiSession>(ui: &S, property_name: &str) -> Result<(), UiError> {
    dismiss_consent(ui);
    ui.click(&reserve_button(), STEP_WAIT)?;
    ui.click(&property_card(property_name), STEP_WAIT)?;
    ui.click(&room_detail_toggle(), STEP_WAIT)?;
    ui.click(&apply_filter_button(), STEP_WAIT)?;
    // Prices rendering inside the calendar is the best readiness signal this
    // page offers, but it only renders for some rate plans.
    if ui.probe(&price_indicator(), PRICE_CONFIRM_WAIT) {
        debug!("calendar prices rendered");
    } else {
        debug!("calendar prices not confirmed, continuing");
    }
    info!(property_name, "search session ready");
    Ok(())
}

/// Cookie banner: absence is normal, and a failed click on a present banner
/// is only worth a warning.
fn dismiss_consent<S: UiSession>(ui: &S) {
    if !ui.probe(&consent_allow(), CONSENT_WAIT) {
        debug!("no consent banner");
        return;
    }
    if let Err(err) = ui.click(&consent_allow(), DISMISS_WAIT) {
        warn!(%err, "consent banner present but not dismissable");
    }
}
