//! Stage results and terminal run states.

use std::fmt;

/// Whether the loaded page still represents the requested product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationResult {
    Verified,
    Redirected,
}

/// Purchase-control state found by the availability probe.
///
/// `NotFound` covers both an absent control and a poll that ran out of
/// budget; the two are indistinguishable from the outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityResult {
    Available,
    PresentButDisabled,
    NotFound,
}

/// Terminal state of one monitor run.
///
/// ```text
/// Start ──load error──────────────────────────────▶ LoadFailed
///   │
///   ▼
/// Loaded ──path mismatch──────────────────────────▶ RedirectRejected
///   │
///   ▼
/// PathVerified ──probe──┬─ Available ─────────────▶ Alerted
///                       ├─ PresentButDisabled ────▶ DisabledSeen
///                       └─ NotFound ──────────────▶ NotAvailable
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    LoadFailed,
    RedirectRejected,
    NotAvailable,
    DisabledSeen,
    Alerted,
}

impl RunOutcome {
    /// Stable identifier used in structured log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            RunOutcome::LoadFailed => "load_failed",
            RunOutcome::RedirectRejected => "redirect_rejected",
            RunOutcome::NotAvailable => "not_available",
            RunOutcome::DisabledSeen => "disabled_seen",
            RunOutcome::Alerted => "alerted",
        }
    }

    /// Whether this outcome dispatched an alert.
    pub fn is_alert(&self) -> bool {
        matches!(self, RunOutcome::Alerted)
    }
}

impl From<AvailabilityResult> for RunOutcome {
    fn from(result: AvailabilityResult) -> Self {
        match result {
            AvailabilityResult::Available => RunOutcome::Alerted,
            AvailabilityResult::PresentButDisabled => RunOutcome::DisabledSeen,
            AvailabilityResult::NotFound => RunOutcome::NotAvailable,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
