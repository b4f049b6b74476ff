//! Page state snapshots for logs and alerts.

use chrono::{DateTime, TimeDelta, Timelike, Utc};
use chrono_tz::Tz;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::entities::{ABSENT_FIELD, BLANK_URL, MonitorTarget, PageSnapshot};
use crate::domain::ports::RenderedPage;
use crate::error::PageError;

/// Captures a [`PageSnapshot`] from a rendered page.
///
/// Never fails: each unreadable field degrades to a sentinel on its own.
///
/// Timestamps are the wall-clock time at construction advanced by the tokio
/// clock, so they stay monotonic within a run.
#[derive(Debug, Clone)]
pub struct DiagnosticsCollector {
    timezone: Tz,
    started_at: Instant,
    started_wall: DateTime<Utc>,
}

impl DiagnosticsCollector {
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            started_at: Instant::now(),
            started_wall: Utc::now(),
        }
    }

    /// Current time in the configured zone, truncated to whole seconds.
    pub fn now(&self) -> DateTime<Tz> {
        let elapsed = TimeDelta::from_std(self.started_at.elapsed()).unwrap_or(TimeDelta::zero());
        let now = (self.started_wall + elapsed).with_timezone(&self.timezone);
        now.with_nanosecond(0).unwrap_or(now)
    }

    pub async fn snapshot(&self, page: &dyn RenderedPage, target: &MonitorTarget) -> PageSnapshot {
        let url = match page.current_url().await {
            Ok(url) if !url.trim().is_empty() => url,
            Ok(_) => BLANK_URL.to_string(),
            Err(e) => {
                debug!(error = %e, "Failed to read page URL");
                BLANK_URL.to_string()
            }
        };

        let title = text_or_absent("title", page.title().await);
        let heading = text_or_absent("heading", page.heading().await);

        let captured_at = self.now();

        PageSnapshot {
            target_url: target.as_str().to_string(),
            url,
            title,
            heading,
            captured_at,
        }
    }
}

fn text_or_absent(field: &'static str, read: Result<Option<String>, PageError>) -> String {
    match read {
        Ok(Some(text)) => {
            let text = text.trim();
            if text.is_empty() {
                ABSENT_FIELD.to_string()
            } else {
                text.to_string()
            }
        }
        Ok(None) => ABSENT_FIELD.to_string(),
        Err(e) => {
            debug!(field, error = %e, "Failed to read page field");
            ABSENT_FIELD.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockRenderedPage;
    use chrono_tz::Europe::Warsaw;

    fn target() -> MonitorTarget {
        MonitorTarget::parse("https://shop.test/p/x?variant=BLUE").unwrap()
    }

    #[tokio::test]
    async fn test_snapshot_full_page() {
        let mut page = MockRenderedPage::new();
        page.expect_current_url()
            .returning(|| Ok("https://shop.test/p/x?variant=BLUE".to_string()));
        page.expect_title()
            .returning(|| Ok(Some("Phone X | Shop".to_string())));
        page.expect_heading()
            .returning(|| Ok(Some("  Phone X 512 GB \n".to_string())));

        let snapshot = DiagnosticsCollector::new(Warsaw)
            .snapshot(&page, &target())
            .await;

        assert_eq!(snapshot.target_url, "https://shop.test/p/x?variant=BLUE");
        assert_eq!(snapshot.url, "https://shop.test/p/x?variant=BLUE");
        assert_eq!(snapshot.title, "Phone X | Shop");
        assert_eq!(snapshot.heading, "Phone X 512 GB");
        assert_eq!(snapshot.captured_at.timezone(), Warsaw);
        assert_eq!(snapshot.captured_at.nanosecond(), 0);
    }

    #[tokio::test]
    async fn test_snapshot_without_heading_uses_sentinel() {
        let mut page = MockRenderedPage::new();
        page.expect_current_url()
            .returning(|| Ok("https://shop.test/p/x".to_string()));
        page.expect_title().returning(|| Ok(Some("Phone X".to_string())));
        page.expect_heading().returning(|| Ok(None));

        let snapshot = DiagnosticsCollector::new(Warsaw)
            .snapshot(&page, &target())
            .await;

        assert_eq!(snapshot.heading, ABSENT_FIELD);
        assert!(!snapshot.has_heading());
    }

    #[tokio::test]
    async fn test_snapshot_degrades_every_failed_field() {
        let mut page = MockRenderedPage::new();
        page.expect_current_url()
            .returning(|| Err(PageError::Protocol("target closed".to_string())));
        page.expect_title()
            .returning(|| Err(PageError::Protocol("target closed".to_string())));
        page.expect_heading()
            .returning(|| Err(PageError::Script("not a string".to_string())));

        let snapshot = DiagnosticsCollector::new(Warsaw)
            .snapshot(&page, &target())
            .await;

        assert_eq!(snapshot.url, BLANK_URL);
        assert_eq!(snapshot.title, ABSENT_FIELD);
        assert_eq!(snapshot.heading, ABSENT_FIELD);
    }

    #[tokio::test]
    async fn test_snapshot_blank_values_are_absent() {
        let mut page = MockRenderedPage::new();
        page.expect_current_url().returning(|| Ok(String::new()));
        page.expect_title().returning(|| Ok(Some("   ".to_string())));
        page.expect_heading().returning(|| Ok(Some(String::new())));

        let snapshot = DiagnosticsCollector::new(Warsaw)
            .snapshot(&page, &target())
            .await;

        assert_eq!(snapshot.url, BLANK_URL);
        assert_eq!(snapshot.title, ABSENT_FIELD);
        assert_eq!(snapshot.heading, ABSENT_FIELD);
    }

    #[tokio::test(start_paused = true)]
    async fn test_now_follows_runtime_clock() {
        let collector = DiagnosticsCollector::new(Warsaw);
        let first = collector.now();

        tokio::time::advance(std::time::Duration::from_secs(15)).await;
        let later = collector.now();

        let lag = later - first;
        assert!(lag >= TimeDelta::seconds(14) && lag <= TimeDelta::seconds(16));
        assert_eq!(later.timezone(), Warsaw);
    }
}
