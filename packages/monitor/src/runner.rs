//! Single-pass monitor run.
//!
//! One run walks the watchlist in order: fetch the page, extract the
//! listing count, fire the notifier on a zero-to-positive transition,
//! record the new count. The updated state document is written back
//! wholesale at the end. Pages are checked strictly sequentially.

use tracing::{error, info, warn};

use crate::config::PageTarget;
use crate::error::Result;
use crate::extract::extract_listing_count;
use crate::fetch::PageFetcher;
use crate::notify::{should_notify, Notifier};
use crate::state::StateStore;

/// Summary of one monitor run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Pages fetched successfully
    pub pages_checked: usize,

    /// Pages a count was extracted from
    pub counts_extracted: usize,

    /// Notifications delivered
    pub notifications_sent: usize,
}

/// The monitor, generic over its three collaborators.
pub struct Monitor<F, N, S> {
    fetcher: F,
    notifier: N,
    store: S,
}

impl<F, N, S> Monitor<F, N, S>
where
    F: PageFetcher,
    N: Notifier,
    S: StateStore,
{
    pub fn new(fetcher: F, notifier: N, store: S) -> Self {
        Self {
            fetcher,
            notifier,
            store,
        }
    }

    /// Check every page in the watchlist once.
    ///
    /// Fetch failures are fatal and abort the run without persisting
    /// anything. Extraction failures leave that page's recorded count
    /// unmodified and the run continues. Notification failures are
    /// logged; the new count is still recorded so the transition is not
    /// re-fired on the next run.
    pub async fn run(&self, watchlist: &[PageTarget]) -> Result<RunReport> {
        let mut state = self.store.load().await?;
        let mut report = RunReport::default();

        for page in watchlist {
            info!(page = %page.id, url = %page.url, "checking page");
            let html = self.fetcher.fetch(&page.url).await?;
            report.pages_checked += 1;

            let Some(count) = extract_listing_count(&html) else {
                warn!(page = %page.id, "no listing count found, previous state kept");
                continue;
            };
            report.counts_extracted += 1;

            let previous = state.get(page.id.as_str()).copied();
            info!(page = %page.id, count, previous = ?previous, "listing count extracted");

            if should_notify(previous, count) {
                match self.notifier.notify(page, count).await {
                    Ok(()) => report.notifications_sent += 1,
                    Err(e) => error!(page = %page.id, error = %e, "notification failed"),
                }
            }

            state.insert(page.id.clone(), count);
        }

        self.store.save(&state).await?;
        info!(
            pages = report.pages_checked,
            counts = report.counts_extracted,
            notifications = report.notifications_sent,
            "run complete"
        );

        Ok(report)
    }
}
