pub mod browser;
pub mod driver;
pub mod jumeirah;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod fake;

pub use browser::ChromeBackend;
pub use driver::{DateWindowDriver, RunError};
pub use traits::{UiBackend, UiSession};
pub use types::{Locator, ScanParams, UiError};
