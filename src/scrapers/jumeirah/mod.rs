//! Site wiring for the Jumeirah booking flow: where things live on the page
//! and how long each step may take.

pub mod availability;
pub mod calendar;
pub mod prepare;
pub mod rooms;

use std::time::Duration;

use crate::scrapers::types::Locator;

// Wait budgets. Optional affordances get short ones, primary content loads
// get long ones.
pub(crate) const CONSENT_WAIT: Duration = Duration::from_secs(15);
pub(crate) const STEP_WAIT: Duration = Duration::from_secs(10);
pub(crate) const PRICE_CONFIRM_WAIT: Duration = Duration::from_secs(5);
pub(crate) const MONTH_LABEL_WAIT: Duration = Duration::from_secs(10);
pub(crate) const DAY_CELL_WAIT: Duration = Duration::from_secs(10);
pub(crate) const UNAVAILABLE_PROBE_WAIT: Duration = Duration::from_secs(2);
pub(crate) const DISMISS_WAIT: Duration = Duration::from_secs(2);
pub(crate) const RESULTS_CTA_WAIT: Duration = Duration::from_secs(10);
pub(crate) const ROOM_LIST_WAIT: Duration = Duration::from_secs(45);
/// Wall-clock ceiling on one whole month seek, on top of the per-step bounds.
pub(crate) const MONTH_SEEK_DEADLINE: Duration = Duration::from_secs(60);

pub(crate) fn consent_allow() -> Locator {
    Locator::text("a.wscrOk2", "Allow All")
}

pub(crate) fn reserve_button() -> Locator {
    Locator::text("button", "RESERVE")
}

pub(crate) fn property_card(name: &str) -> Locator {
    Locator::text("div.hotels-name", name)
}

pub(crate) fn room_detail_toggle() -> Locator {
    Locator::css("#room-1 span img")
}

pub(crate) fn apply_filter_button() -> Locator {
    Locator::text("button", "APPLY")
}

pub(crate) fn price_indicator() -> Locator {
    Locator::css("span.calender-price")
}

pub(crate) fn month_label() -> Locator {
    Locator::css("div.DayPicker-Month")
}

pub(crate) fn next_month_control() -> Locator {
    Locator::css("span[aria-label='Next Month']")
}

pub(crate) fn day_cell(day: u32) -> Locator {
    Locator::text("span.calender_date.flex-2", day.to_string())
}

pub(crate) fn unavailable_title() -> Locator {
    Locator::css("div.unavailable-title")
}

pub(crate) fn unavailable_description() -> Locator {
    Locator::css("div.description")
}

pub(crate) fn dismiss_icon() -> Locator {
    Locator::css("img.close-icon")
}

pub(crate) fn dismiss_alternate() -> Locator {
    Locator::css("div.alternate-btn")
}

pub(crate) fn discover_stays_button() -> Locator {
    Locator::text("button", "DISCOVER STAYS")
}

pub(crate) fn apply_date_control() -> Locator {
    Locator::text("div.confirm-date-cta.date-apply-active", "Apply")
}

pub(crate) fn room_names() -> Locator {
    Locator::css("span.content-heading-text")
}

pub(crate) fn room_prices() -> Locator {
    Locator::css("div.rate-price")
}

pub(crate) fn room_sizes() -> Locator {
    Locator::css("span.hotel-size-text")
}
