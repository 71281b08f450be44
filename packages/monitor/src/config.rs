//! Runtime configuration loaded from the environment.
//!
//! The watchlist has a built-in default and can be overridden with
//! `MONITOR_PAGES` (`id=url` pairs separated by commas). SMTP settings
//! come from `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASS` and
//! `MAIL_TO`, typically injected as CI secrets.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{MonitorError, Result};

/// Default state file, next to the working directory the job runs in.
const DEFAULT_STATE_FILE: &str = "state.json";

/// Default SMTP submission port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// A monitored page: stable identifier plus the URL to poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTarget {
    /// Identifier used as the state-document key and in notifications
    pub id: String,

    /// URL fetched each run
    pub url: String,
}

impl PageTarget {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// SMTP delivery settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub recipient: String,
}

impl SmtpConfig {
    /// Load SMTP settings from the environment.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("SMTP_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| MonitorError::config(format!("invalid SMTP_PORT {raw:?}: {e}")))?,
            Err(_) => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            host: require_var("SMTP_HOST")?,
            port,
            user: require_var("SMTP_USER")?,
            password: require_var("SMTP_PASS")?,
            recipient: require_var("MAIL_TO")?,
        })
    }
}

/// Full monitor configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pages to check, in run order
    pub watchlist: Vec<PageTarget>,

    /// Path of the persisted state document
    pub state_path: PathBuf,

    /// SMTP delivery settings
    pub smtp: SmtpConfig,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let watchlist = match env::var("MONITOR_PAGES") {
            Ok(raw) => parse_watchlist(&raw)?,
            Err(_) => default_watchlist(),
        };

        let state_path = env::var("STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_FILE));

        Ok(Self {
            watchlist,
            state_path,
            smtp: SmtpConfig::from_env()?,
        })
    }
}

/// The pages watched when `MONITOR_PAGES` is not set.
pub fn default_watchlist() -> Vec<PageTarget> {
    vec![PageTarget::new(
        "wbc2026-bidding-1517",
        "https://tradead.tixplus.jp/wbc2026/buy/bidding/listings/1517",
    )]
}

/// Parse a `MONITOR_PAGES` value: comma-separated `id=url` pairs.
pub fn parse_watchlist(raw: &str) -> Result<Vec<PageTarget>> {
    let mut pages = Vec::new();

    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let (id, url) = entry.split_once('=').ok_or_else(|| {
            MonitorError::config(format!("MONITOR_PAGES entry {entry:?} is not id=url"))
        })?;

        let id = id.trim();
        let url = url.trim();
        if id.is_empty() {
            return Err(MonitorError::config(format!(
                "MONITOR_PAGES entry {entry:?} has an empty id"
            )));
        }

        Url::parse(url)
            .map_err(|e| MonitorError::config(format!("invalid URL for page {id:?}: {e}")))?;

        pages.push(PageTarget::new(id, url));
    }

    if pages.is_empty() {
        return Err(MonitorError::config("MONITOR_PAGES is set but empty"));
    }

    Ok(pages)
}

fn require_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| MonitorError::config(format!("{name} is not set")))
}
