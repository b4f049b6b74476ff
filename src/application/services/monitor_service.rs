//! Single-pass monitor run.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::application::services::{AvailabilityProbe, DiagnosticsCollector};
use crate::domain::entities::alert::path_diagnostic;
use crate::domain::entities::{
    AvailabilityResult, MonitorTarget, PageSnapshot, RunOutcome, StructuredAlert,
    VerificationResult,
};
use crate::domain::ports::{AlertDispatcher, PageLoader, RenderedPage};
use crate::utils::path_matcher;

/// Run-time knobs for [`MonitorService`].
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// Purchase-action label, e.g. `do koszyka`.
    pub cart_label: String,
    /// Text line prepended to alerts. `None` sends the embed alone.
    pub alert_mention: Option<String>,
    /// Wait after navigation before the page is observed.
    pub settle_delay: Duration,
    pub probe_timeout: Duration,
    pub probe_poll_interval: Duration,
    pub timezone: Tz,
}

/// Checks one product page and alerts when it can be bought.
///
/// Each call to [`MonitorService::run`] is an independent pass with no memory
/// of earlier runs. Retrying over time is left to whatever schedules the
/// process.
pub struct MonitorService<L: PageLoader + ?Sized, D: AlertDispatcher + ?Sized> {
    loader: Arc<L>,
    dispatcher: Arc<D>,
    probe: AvailabilityProbe,
    diagnostics: DiagnosticsCollector,
    settle_delay: Duration,
    probe_timeout: Duration,
    alert_mention: Option<String>,
}

impl<L: PageLoader + ?Sized, D: AlertDispatcher + ?Sized> MonitorService<L, D> {
    /// Creates a new monitor service.
    pub fn new(loader: Arc<L>, dispatcher: Arc<D>, settings: MonitorSettings) -> Self {
        Self {
            loader,
            dispatcher,
            probe: AvailabilityProbe::new(&settings.cart_label, settings.probe_poll_interval),
            diagnostics: DiagnosticsCollector::new(settings.timezone),
            settle_delay: settings.settle_delay,
            probe_timeout: settings.probe_timeout,
            alert_mention: settings.alert_mention,
        }
    }

    /// Runs one check against `target` and returns its terminal state.
    ///
    /// # Flow
    ///
    /// 1. Load the page. Failure ends the run as [`RunOutcome::LoadFailed`]
    /// 2. Wait the settle delay and snapshot the page
    /// 3. Compare paths. A mismatch ends the run as [`RunOutcome::RedirectRejected`]
    /// 4. Probe for the purchase control within the probe budget
    /// 5. Dispatch an alert only if the control is enabled
    ///
    /// Exactly one summary line is logged per run. The page is closed on
    /// every path once loaded, including when a stage panics (the panic is
    /// re-raised after the page is released).
    pub async fn run(&self, target: &MonitorTarget) -> RunOutcome {
        let page = match self.loader.load(target.as_str()).await {
            Ok(page) => page,
            Err(e) => {
                let outcome = RunOutcome::LoadFailed;
                warn!(
                    outcome = %outcome,
                    url = %target,
                    error = %e,
                    "Product page failed to load; skipping this check"
                );
                return outcome;
            }
        };

        let staged = AssertUnwindSafe(self.inspect(page.as_ref(), target))
            .catch_unwind()
            .await;

        match page.close().await {
            Ok(()) => debug!("Browser released"),
            Err(e) => warn!(error = %e, "Failed to release browser cleanly"),
        }

        match staged {
            Ok(outcome) => outcome,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    /// Stages after a successful load: settle, verify, probe, alert.
    async fn inspect(&self, page: &dyn RenderedPage, target: &MonitorTarget) -> RunOutcome {
        tokio::time::sleep(self.settle_delay).await;

        let snapshot = self.diagnostics.snapshot(page, target).await;

        if path_matcher::verify(target.as_str(), &snapshot.url) == VerificationResult::Redirected {
            let outcome = RunOutcome::RedirectRejected;
            info!(
                outcome = %outcome,
                url = %snapshot.url,
                title = %snapshot.title,
                heading = %snapshot.heading,
                checked_at = %snapshot.checked_at(),
                paths = %path_diagnostic(&snapshot),
                "Page no longer shows the product; redirect rejected"
            );
            return outcome;
        }

        let availability = self.probe.probe(page, self.probe_timeout).await;
        let outcome = RunOutcome::from(availability);

        match availability {
            AvailabilityResult::Available => {
                let snapshot = PageSnapshot {
                    captured_at: self.diagnostics.now(),
                    ..snapshot
                };
                let alert = StructuredAlert::product_available(
                    &snapshot,
                    self.probe.label(),
                    self.alert_mention.as_deref(),
                );
                if let Err(e) = self.dispatcher.send(alert).await {
                    warn!(error = %e, "Alert delivery failed");
                }
                info!(
                    outcome = %outcome,
                    url = %snapshot.url,
                    title = %snapshot.title,
                    heading = %snapshot.heading,
                    checked_at = %snapshot.checked_at(),
                    "Purchase control is enabled; alert dispatched"
                );
            }
            AvailabilityResult::PresentButDisabled => {
                info!(
                    outcome = %outcome,
                    url = %snapshot.url,
                    checked_at = %snapshot.checked_at(),
                    "Purchase control is present but disabled"
                );
            }
            AvailabilityResult::NotFound => {
                info!(
                    outcome = %outcome,
                    url = %snapshot.url,
                    checked_at = %snapshot.checked_at(),
                    budget = ?self.probe_timeout,
                    "Purchase control not found"
                );
            }
        }

        outcome
    }
}
