//! Polling availability monitor for listing pages.
//!
//! One run per invocation: fetch each watched page, extract its listing
//! count, compare against the persisted state, email a notification on
//! the zero-to-positive transition, write the new state back. Scheduling
//! (cron, CI workflows) lives outside this crate.
//!
//! The runner is generic over three seams so everything above raw I/O is
//! testable without network traffic:
//!
//! - [`PageFetcher`] — URL in, markup out ([`HttpFetcher`])
//! - [`Notifier`] — transition alert delivery ([`SmtpNotifier`])
//! - [`StateStore`] — whole-document state persistence ([`JsonFileStore`])

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod notify;
pub mod runner;
pub mod state;
pub mod testing;

pub use config::{Config, PageTarget, SmtpConfig};
pub use error::{MonitorError, Result};
pub use extract::extract_listing_count;
pub use fetch::{HttpFetcher, PageFetcher};
pub use notify::{should_notify, Notifier, SmtpNotifier};
pub use runner::{Monitor, RunReport};
pub use state::{JsonFileStore, ListingState, StateStore};
