// Main entry point for the listing monitor

use anyhow::{Context, Result};
use listing_monitor::{Config, HttpFetcher, JsonFileStore, Monitor, SmtpNotifier};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,listing_monitor=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting listing monitor");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        pages = config.watchlist.len(),
        state_file = %config.state_path.display(),
        "Configuration loaded"
    );

    let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;
    let notifier = SmtpNotifier::new(&config.smtp).context("Failed to configure SMTP notifier")?;
    let store = JsonFileStore::new(&config.state_path);

    let monitor = Monitor::new(fetcher, notifier, store);
    let report = monitor
        .run(&config.watchlist)
        .await
        .context("Monitor run failed")?;

    tracing::info!(
        pages = report.pages_checked,
        counts = report.counts_extracted,
        notifications = report.notifications_sent,
        "Run finished"
    );

    Ok(())
}
