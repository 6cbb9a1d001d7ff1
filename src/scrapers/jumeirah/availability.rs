//! The available/unavailable branch point after both stay dates are picked.

use std::time::Duration;

use tracing::{info, warn};

use crate::scrapers::traits::UiSession;

use super::{apply_date_control, discover_stays_button, dismiss_alternate, dismiss_icon,
    unavailable_description, unavailable_title};
use super::{DISMISS_WAIT, RESULTS_CTA_WAIT};

/// Check whether the selected stay came back unavailable.
///
/// When the indicator is up this reads its description and dismisses the
/// dialog so the page stays usable. An indicator without a readable
/// description is treated as the available path; the site sometimes flashes
/// the dialog frame without content.
pub fn check_unavailable<S: UiSession>(ui: &S, budget: Duration) -> Option<String> {
    if !ui.probe(&unavailable_title(), budget) {
        return None;
    }
    let description = match ui.text_of(&unavailable_description(), DISMISS_WAIT) {
        Ok(text) => text,
        Err(err) => {
            warn!(%err, "unavailable indicator without readable description");
            dismiss(ui);
            return None;
        }
    };
    info!(description = %description, "stay reported unavailable");
    dismiss(ui);
    Some(description)
}

/// Close the unavailable dialog through whichever affordance this page
/// variant renders.
fn dismiss<S: UiSession>(ui: &S) {
    if ui.click(&dismiss_icon(), DISMISS_WAIT).is_ok() {
        return;
    }
    if ui.click(&dismiss_alternate(), DISMISS_WAIT).is_ok() {
        return;
    }
    warn!("could not dismiss unavailable dialog");
}

/// Ask for the results view.
///
/// Permissive on purpose: which control renders depends on the page variant,
/// and when neither is clickable the results are usually already on screen.
/// The room-list wait downstream is what actually decides.
pub fn request_results<S: UiSession>(ui: &S) {
    if ui.click(&discover_stays_button(), RESULTS_CTA_WAIT).is_ok() {
        info!("opened results via the discover-stays control");
        return;
    }
    if ui.click(&apply_date_control(), RESULTS_CTA_WAIT).is_ok() {
        info!("opened results via the apply-date control");
        return;
    }
    warn!("no results control clickable, assuming results already visible");
}
