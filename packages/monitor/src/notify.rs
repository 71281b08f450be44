//! Availability notifications.
//!
//! A notification fires on exactly one transition: the previous run
//! recorded zero listings and the current run sees more than zero.
//! First-ever observations stay silent so a fresh deployment against a
//! page that already has listings does not alert.

use async_trait::async_trait;
use chrono::Utc;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::{PageTarget, SmtpConfig};
use crate::error::{MonitorError, Result};

/// The zero-to-positive transition predicate.
///
/// `previous` is the count recorded on the last run, `None` when the
/// page has never been observed.
pub fn should_notify(previous: Option<u64>, current: u64) -> bool {
    previous == Some(0) && current > 0
}

/// Delivers availability notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Notify that `page` now has `count` listings.
    async fn notify(&self, page: &PageTarget, count: u64) -> Result<()>;

    /// Notifier name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

/// SMTP notifier using lettre (STARTTLS submission).
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    /// Build a notifier from SMTP settings. The sender address is the
    /// SMTP user, as most submission servers require.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from: Mailbox = config.user.parse().map_err(|e| {
            MonitorError::config(format!("SMTP_USER is not a valid address: {e}"))
        })?;
        let to: Mailbox = config.recipient.parse().map_err(|e| {
            MonitorError::config(format!("MAIL_TO is not a valid address: {e}"))
        })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MonitorError::config(format!("SMTP relay setup failed: {e}")))?
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from,
            to,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, page: &PageTarget, count: u64) -> Result<()> {
        let subject = format!("[listing-monitor] {} has {} listing(s)", page.id, count);
        let body = format!(
            "Listings are available again.\n\n\
             {id}: {count} listing(s)\n\
             {url}\n\n\
             Checked at {time}\n",
            id = page.id,
            count = count,
            url = page.url,
            time = Utc::now().to_rfc3339(),
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .body(body)
            .map_err(|e| MonitorError::Notify {
                page: page.id.clone(),
                source: Box::new(e),
            })?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MonitorError::Notify {
                page: page.id.clone(),
                source: Box::new(e),
            })?;

        info!(page = %page.id, count, "notification email sent");
        Ok(())
    }

    fn name(&self) -> &str {
        "smtp"
    }
}
