//! Chromium-backed [`RenderedPage`].

use async_trait::async_trait;
use chromiumoxide::{Browser, Page};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use super::{process, scripts};
use crate::domain::entities::ControlSnapshot;
use crate::domain::ports::RenderedPage;
use crate::error::PageError;

/// A navigated tab plus the browser process that owns it.
///
/// [`RenderedPage::close`] shuts the browser down gracefully. If the value is
/// dropped without closing, the DevTools handler task is aborted and
/// chromiumoxide kills the child process.
pub struct ChromePage {
    page: Page,
    browser: Mutex<Option<Browser>>,
    handler_task: JoinHandle<()>,
}

impl ChromePage {
    pub(crate) fn new(browser: Browser, page: Page, handler_task: JoinHandle<()>) -> Self {
        Self {
            page,
            browser: Mutex::new(Some(browser)),
            handler_task,
        }
    }

    pub(crate) fn page(&self) -> &Page {
        &self.page
    }

    async fn eval_string(&self, script: &str) -> Result<String, PageError> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| PageError::Protocol(e.to_string()))?
            .into_value::<String>()
            .map_err(|e| PageError::Script(e.to_string()))
    }
}

#[async_trait]
impl RenderedPage for ChromePage {
    async fn current_url(&self) -> Result<String, PageError> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| PageError::Protocol(e.to_string()))?;
        Ok(url.unwrap_or_default())
    }

    async fn title(&self) -> Result<Option<String>, PageError> {
        self.page
            .get_title()
            .await
            .map_err(|e| PageError::Protocol(e.to_string()))
    }

    async fn heading(&self) -> Result<Option<String>, PageError> {
        let text = self.eval_string(scripts::PRIMARY_HEADING).await?;
        Ok(Some(text).filter(|t| !t.trim().is_empty()))
    }

    async fn actionable_controls(&self) -> Result<Vec<ControlSnapshot>, PageError> {
        let json = self.eval_string(scripts::ACTIONABLE_CONTROLS).await?;
        serde_json::from_str(&json).map_err(|e| PageError::Script(e.to_string()))
    }

    async fn close(&self) -> Result<(), PageError> {
        let Some(mut browser) = self.browser.lock().await.take() else {
            return Ok(());
        };

        let closed = process::shutdown(&mut browser).await;
        self.handler_task.abort();

        closed.map_err(PageError::Protocol)
    }
}

impl Drop for ChromePage {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
