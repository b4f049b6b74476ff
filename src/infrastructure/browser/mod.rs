//! Chromium adapter for [`crate::domain::ports::PageLoader`].
//!
//! Each load launches its own browser process; the process is released
//! when the returned page is closed or dropped.

mod chrome_loader;
mod chrome_page;
mod process;
mod scripts;

pub use chrome_loader::{BrowserSettings, ChromePageLoader, DEFAULT_USER_AGENT};
pub use chrome_page::ChromePage;
