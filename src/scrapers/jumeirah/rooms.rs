//! Reading the rendered room offers off the results view.

use tracing::debug;

use crate::models::RoomOffer;
use crate::scrapers::traits::UiSession;
use crate::scrapers::types::UiError;

use super::{room_names, room_prices, room_sizes, ROOM_LIST_WAIT};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The room list never rendered, or the page broke underneath us.
    #[error("room offers never rendered: {0}")]
    Ui(#[from] UiError),
    /// The three per-field lists disagree; pairing them would mislabel rooms.
    #[error("mismatched offer fields: {names} names, {prices} prices, {sizes} sizes")]
    FieldMismatch {
        names: usize,
        prices: usize,
        sizes: usize,
    },
}

/// Read every rendered offer. Results pages render slowly, so the initial
/// wait carries the longest budget in the crate.
pub fn extract<S: UiSession>(ui: &S) -> Result<Vec<RoomOffer>, ExtractError> {
    ui.wait_for(&room_names(), ROOM_LIST_WAIT)?;
    let names = ui.texts_of(&room_names())?;
    let prices = ui.texts_of(&room_prices())?;
    let sizes = ui.texts_of(&room_sizes())?;
    debug!(rooms = names.len(), "room offer lists read");
    pair_offers(names, prices, sizes)
}

/// Zip the three per-field lists positionally into offers.
///
/// Lengths must agree exactly. A mismatch means the page structure shifted
/// under the selectors, and pairing by position would attach prices to the
/// wrong rooms.
pub fn pair_offers(
    names: Vec<String>,
    prices: Vec<String>,
    sizes: Vec<String>,
) -> Result<Vec<RoomOffer>, ExtractError> {
    if names.len() != prices.len() || names.len() != sizes.len() {
        return Err(ExtractError::FieldMismatch {
            names: names.len(),
            prices: prices.len(),
            sizes: sizes.len(),
        });
    }
    Ok(names
        .into_iter()
        .zip(prices)
        .zip(sizes)
        .map(|((name, price), room_size)| RoomOffer { name, price, room_size })
        .collect())
}
