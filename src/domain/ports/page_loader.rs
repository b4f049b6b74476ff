//! Page loading collaborator.

use async_trait::async_trait;

use crate::domain::entities::ControlSnapshot;
use crate::error::{LoadError, PageError};

/// A page that finished navigation and can be observed.
///
/// Implementations own the browser resources behind the page. Callers must
/// invoke [`RenderedPage::close`] when the run ends, on every path.
///
/// # Implementations
///
/// - [`crate::infrastructure::browser::ChromePage`] - Chromium over DevTools
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RenderedPage: Send + Sync {
    /// URL the page currently shows, after any client-side redirects.
    async fn current_url(&self) -> Result<String, PageError>;

    /// Document title, or `None` when the document has none.
    async fn title(&self) -> Result<Option<String>, PageError>;

    /// Text of the first `h1`, or `None` when the page has no heading.
    async fn heading(&self) -> Result<Option<String>, PageError>;

    /// Every element on the page that could act as a purchase control.
    async fn actionable_controls(&self) -> Result<Vec<ControlSnapshot>, PageError>;

    /// Releases the page and the browser behind it. Safe to call more than once.
    async fn close(&self) -> Result<(), PageError>;
}

/// Drives a browser to a URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageLoader: Send + Sync {
    /// Navigates to `url` and returns the rendered page.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the browser cannot start, navigation fails,
    /// or navigation exceeds the loader's budget. No browser resources are
    /// left running when an error is returned.
    async fn load(&self, url: &str) -> Result<Box<dyn RenderedPage>, LoadError>;
}
