//! Testing utilities including mock implementations.
//!
//! These are useful for testing the runner without real HTTP or SMTP
//! traffic: canned markup per URL, and a notifier that records what it
//! was asked to send.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::config::PageTarget;
use crate::error::{MonitorError, Result};
use crate::fetch::PageFetcher;
use crate::notify::Notifier;

/// A mock fetcher returning predefined markup per URL.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Fail fetches of `url` with a network-style error.
    pub fn failing(mut self, url: impl Into<String>) -> Self {
        self.failing.insert(url.into());
        self
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        if self.failing.contains(url) {
            return Err(MonitorError::Fetch {
                url: url.to_string(),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "mock connection refused",
                )),
            });
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| MonitorError::HttpStatus {
                status: 404,
                url: url.to_string(),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Record of one notification the mock notifier was asked to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub page_id: String,
    pub count: u64,
}

/// A mock notifier that records notifications for assertions.
#[derive(Default, Clone)]
pub struct MockNotifier {
    sent: Arc<RwLock<Vec<SentNotification>>>,
    fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every delivery attempt fail.
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            fail: true,
        }
    }

    /// Notifications recorded so far.
    pub fn sent(&self) -> Vec<SentNotification> {
        self.sent.read().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, page: &PageTarget, count: u64) -> Result<()> {
        if self.fail {
            return Err(MonitorError::Notify {
                page: page.id.clone(),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "mock delivery failure",
                )),
            });
        }

        self.sent.write().unwrap().push(SentNotification {
            page_id: page.id.clone(),
            count,
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
