//! Bounded polling for the purchase control.

use std::time::Duration;

use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, trace};

use crate::domain::entities::{AvailabilityResult, ControlSnapshot};
use crate::domain::ports::RenderedPage;
use crate::utils::label_matcher::LabelMatcher;

/// Stand-in deadline for budgets too large to add to the current instant.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Looks for an actionable element labelled with the purchase text.
///
/// The probe only waits for that element. General page readiness is the
/// caller's job (see the settle delay in
/// [`crate::application::services::MonitorService`]).
#[derive(Debug, Clone)]
pub struct AvailabilityProbe {
    matcher: LabelMatcher,
    poll_interval: Duration,
}

impl AvailabilityProbe {
    pub fn new(label: &str, poll_interval: Duration) -> Self {
        Self {
            matcher: LabelMatcher::new(label),
            poll_interval,
        }
    }

    pub fn label(&self) -> &str {
        self.matcher.label()
    }

    /// Polls `page` until a visible purchase control appears or `budget` runs out.
    ///
    /// The page is always queried at least once. A failed query counts as
    /// "not found yet". Running out of budget yields
    /// [`AvailabilityResult::NotFound`], which is the normal result for an
    /// unavailable product.
    pub async fn probe(&self, page: &dyn RenderedPage, budget: Duration) -> AvailabilityResult {
        let deadline = deadline_after(budget);
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let remaining = deadline.saturating_duration_since(Instant::now());

            match timeout(remaining, page.actionable_controls()).await {
                Ok(Ok(controls)) => {
                    if let Some(result) = self.evaluate(&controls) {
                        debug!(attempts, ?result, "Purchase control found");
                        return result;
                    }
                    trace!(attempts, controls = controls.len(), "No purchase control yet");
                }
                Ok(Err(e)) => debug!(attempts, error = %e, "Control query failed; retrying"),
                Err(_) => trace!(attempts, "Control query exceeded remaining budget"),
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                debug!(attempts, ?budget, "Purchase control did not appear within budget");
                return AvailabilityResult::NotFound;
            }
            sleep(self.poll_interval.min(remaining)).await;
        }
    }

    /// Classifies one set of controls.
    ///
    /// Returns `None` when no visible actionable control carries the label.
    /// When several do, any enabled one makes the product available.
    pub fn evaluate(&self, controls: &[ControlSnapshot]) -> Option<AvailabilityResult> {
        let mut matching = controls
            .iter()
            .filter(|c| c.visible && c.is_actionable() && self.matcher.matches(&c.text))
            .peekable();

        matching.peek()?;

        if matching.any(ControlSnapshot::is_enabled) {
            Some(AvailabilityResult::Available)
        } else {
            Some(AvailabilityResult::PresentButDisabled)
        }
    }
}

fn deadline_after(budget: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(budget).unwrap_or(now + FAR_FUTURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockRenderedPage;
    use crate::error::PageError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn probe() -> AvailabilityProbe {
        AvailabilityProbe::new("do koszyka", Duration::from_millis(500))
    }

    #[test]
    fn test_evaluate_enabled_button() {
        let controls = vec![
            ControlSnapshot::new("a", "Regulamin"),
            ControlSnapshot::new("button", "Do koszyka"),
        ];
        assert_eq!(
            probe().evaluate(&controls),
            Some(AvailabilityResult::Available)
        );
    }

    #[test]
    fn test_evaluate_lowercase_label_text() {
        let controls = vec![ControlSnapshot::new("button", "dodaj do koszyka")];
        assert_eq!(
            probe().evaluate(&controls),
            Some(AvailabilityResult::Available)
        );
    }

    #[test]
    fn test_evaluate_disabled_button() {
        let controls = vec![ControlSnapshot::new("button", "Do koszyka").disabled()];
        assert_eq!(
            probe().evaluate(&controls),
            Some(AvailabilityResult::PresentButDisabled)
        );
    }

    #[test]
    fn test_evaluate_any_enabled_match_wins() {
        let controls = vec![
            ControlSnapshot::new("button", "Do koszyka").disabled(),
            ControlSnapshot::new("a", "Do koszyka"),
        ];
        assert_eq!(
            probe().evaluate(&controls),
            Some(AvailabilityResult::Available)
        );
    }

    #[test]
    fn test_evaluate_ignores_decorative_and_hidden_elements() {
        let controls = vec![
            ControlSnapshot::new("span", "Do koszyka"),
            ControlSnapshot::new("button", "Do koszyka").hidden(),
            ControlSnapshot::new("button", "Powiadom mnie"),
        ];
        assert_eq!(probe().evaluate(&controls), None);
    }

    #[test]
    fn test_evaluate_role_button() {
        let controls = vec![ControlSnapshot::new("div", "Do koszyka").with_role("button")];
        assert_eq!(
            probe().evaluate(&controls),
            Some(AvailabilityResult::Available)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_returns_immediately_when_present() {
        let mut page = MockRenderedPage::new();
        page.expect_actionable_controls()
            .times(1)
            .returning(|| Ok(vec![ControlSnapshot::new("button", "Do koszyka")]));

        let started = Instant::now();
        let result = probe().probe(&page, Duration::from_secs(20)).await;

        assert_eq!(result, AvailabilityResult::Available);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_waits_for_late_control() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let mut page = MockRenderedPage::new();
        page.expect_actionable_controls().returning(move || {
            if counter.fetch_add(1, Ordering::SeqCst) < 3 {
                Ok(vec![])
            } else {
                Ok(vec![ControlSnapshot::new("button", "Do koszyka").disabled()])
            }
        });

        let result = probe().probe(&page, Duration::from_secs(20)).await;

        assert_eq!(result, AvailabilityResult::PresentButDisabled);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_times_out_to_not_found() {
        let mut page = MockRenderedPage::new();
        page.expect_actionable_controls()
            .returning(|| Ok(vec![ControlSnapshot::new("h1", "Do koszyka")]));

        let started = Instant::now();
        let result = probe().probe(&page, Duration::from_secs(20)).await;

        assert_eq!(result, AvailabilityResult::NotFound);
        assert_eq!(started.elapsed(), Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_not_found_is_repeatable() {
        let mut page = MockRenderedPage::new();
        page.expect_actionable_controls()
            .returning(|| Ok(vec![ControlSnapshot::new("a", "Zobacz inne telefony")]));

        let probe = probe();
        let first = probe.probe(&page, Duration::from_secs(2)).await;
        let second = probe.probe(&page, Duration::from_secs(2)).await;

        assert_eq!(first, AvailabilityResult::NotFound);
        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_tolerates_query_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let mut page = MockRenderedPage::new();
        page.expect_actionable_controls().returning(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(PageError::Protocol("execution context was destroyed".to_string()))
            } else {
                Ok(vec![ControlSnapshot::new("button", "Do koszyka")])
            }
        });

        let result = probe().probe(&page, Duration::from_secs(5)).await;

        assert_eq!(result, AvailabilityResult::Available);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_zero_budget_checks_once() {
        let mut page = MockRenderedPage::new();
        page.expect_actionable_controls()
            .times(1)
            .returning(|| Ok(vec![]));

        let result = probe().probe(&page, Duration::ZERO).await;

        assert_eq!(result, AvailabilityResult::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_with_unbounded_budget_does_not_overflow() {
        let polls = Arc::new(AtomicU32::new(0));
        let counter = polls.clone();

        let mut page = MockRenderedPage::new();
        page.expect_actionable_controls().returning(move || {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Ok(vec![])
            } else {
                Ok(vec![ControlSnapshot::new("button", "Do koszyka")])
            }
        });

        let started = Instant::now();
        let result = probe().probe(&page, Duration::from_secs(u64::MAX)).await;

        assert_eq!(result, AvailabilityResult::Available);
        assert_eq!(polls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(1));
    }

    #[test]
    fn test_deadline_after_saturates() {
        let deadline = deadline_after(Duration::MAX);
        assert!(deadline > Instant::now());
    }
}
