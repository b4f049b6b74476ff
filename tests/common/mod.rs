#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cart_watch::prelude::*;

pub const TARGET: &str = "https://shop.test/esklep/smartfony/phone-x?variant=BLUE";

pub fn settings() -> MonitorSettings {
    MonitorSettings {
        cart_label: "do koszyka".to_string(),
        alert_mention: Some("@everyone".to_string()),
        settle_delay: Duration::from_secs(5),
        probe_timeout: Duration::from_secs(20),
        probe_poll_interval: Duration::from_millis(500),
        timezone: chrono_tz::Europe::Warsaw,
    }
}

pub fn target() -> MonitorTarget {
    MonitorTarget::parse(TARGET).unwrap()
}

pub fn cart_button() -> ControlSnapshot {
    ControlSnapshot::new("button", "Do koszyka")
}

/// Scripted page: each poll pops the next control list, the last one repeats.
pub struct FakePage {
    url: String,
    title: Option<String>,
    heading: Option<String>,
    polls: Mutex<VecDeque<Vec<ControlSnapshot>>>,
    closes: Arc<AtomicUsize>,
}

impl FakePage {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: Some("Phone X | Shop".to_string()),
            heading: Some("Phone X 512 GB".to_string()),
            polls: Mutex::new(VecDeque::from([Vec::new()])),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn without_heading(mut self) -> Self {
        self.heading = None;
        self
    }

    pub fn with_polls(self, polls: Vec<Vec<ControlSnapshot>>) -> Self {
        *self.polls.lock().unwrap() = polls.into();
        self
    }

    pub fn with_controls(self, controls: Vec<ControlSnapshot>) -> Self {
        self.with_polls(vec![controls])
    }

    pub fn close_counter(&self) -> Arc<AtomicUsize> {
        self.closes.clone()
    }
}

#[async_trait]
impl RenderedPage for FakePage {
    async fn current_url(&self) -> Result<String, PageError> {
        Ok(self.url.clone())
    }

    async fn title(&self) -> Result<Option<String>, PageError> {
        Ok(self.title.clone())
    }

    async fn heading(&self) -> Result<Option<String>, PageError> {
        Ok(self.heading.clone())
    }

    async fn actionable_controls(&self) -> Result<Vec<ControlSnapshot>, PageError> {
        let mut polls = self.polls.lock().unwrap();
        if polls.len() > 1 {
            Ok(polls.pop_front().unwrap_or_default())
        } else {
            Ok(polls.front().cloned().unwrap_or_default())
        }
    }

    async fn close(&self) -> Result<(), PageError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out prepared pages in order; fails to load once they run out.
#[derive(Default)]
pub struct FakeLoader {
    pages: Mutex<VecDeque<FakePage>>,
    loads: AtomicUsize,
}

impl FakeLoader {
    pub fn serving(pages: Vec<FakePage>) -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(pages.into()),
            loads: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageLoader for FakeLoader {
    async fn load(&self, url: &str) -> Result<Box<dyn RenderedPage>, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match self.pages.lock().unwrap().pop_front() {
            Some(page) => Ok(Box::new(page)),
            None => Err(LoadError::Navigation {
                url: url.to_string(),
                reason: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            }),
        }
    }
}

/// Records every alert it is handed.
#[derive(Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<StructuredAlert>>,
    reject_with: Option<u16>,
}

impl RecordingDispatcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn rejecting(status: u16) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            reject_with: Some(status),
        })
    }

    pub fn sent(&self) -> Vec<StructuredAlert> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertDispatcher for RecordingDispatcher {
    async fn send(&self, alert: StructuredAlert) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(alert);
        match self.reject_with {
            Some(status) => Err(DeliveryError::Rejected { status }),
            None => Ok(()),
        }
    }
}
