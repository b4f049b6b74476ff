//! Observed page state for a single run.

use chrono::DateTime;
use chrono_tz::Tz;

/// Placeholder for a page field that does not exist or could not be read.
pub const ABSENT_FIELD: &str = "<absent>";

/// URL reported when the page URL could not be read.
pub const BLANK_URL: &str = "about:blank";

/// What the page looked like after it settled.
///
/// Built once per run by [`crate::application::services::DiagnosticsCollector`]
/// and never modified. Every field is always populated: unreadable values
/// carry [`ABSENT_FIELD`] or [`BLANK_URL`] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot {
    pub target_url: String,
    pub url: String,
    pub title: String,
    pub heading: String,
    pub captured_at: DateTime<Tz>,
}

impl PageSnapshot {
    /// Capture time with second precision, in the monitor's time zone.
    pub fn checked_at(&self) -> String {
        self.captured_at.format("%Y-%m-%d %H:%M:%S %Z").to_string()
    }

    pub fn has_heading(&self) -> bool {
        self.heading != ABSENT_FIELD
    }
}
