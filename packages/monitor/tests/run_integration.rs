//! Integration tests for the full monitor run.
//!
//! These wire the runner to mock fetchers/notifiers and a real JSON
//! file store, and verify the run loop end to end:
//! 1. Load state
//! 2. Fetch and extract per page
//! 3. Notify on the zero-to-positive transition only
//! 4. Persist the updated document

use listing_monitor::{
    testing::{MockFetcher, MockNotifier},
    JsonFileStore, ListingState, Monitor, PageTarget, StateStore,
};

fn listings_page(count: u64) -> String {
    format!(
        r#"<html><body><main>
             <div class="listings"><div class="counter"><span>{count}</span></div></div>
           </main></body></html>"#
    )
}

fn page(id: &str) -> PageTarget {
    PageTarget::new(id, format!("https://example.com/{id}"))
}

async fn seed_state(store: &JsonFileStore, entries: &[(&str, u64)]) {
    let mut state = ListingState::new();
    for (id, count) in entries {
        state.insert((*id).to_string(), *count);
    }
    store.save(&state).await.unwrap();
}

#[tokio::test]
async fn zero_to_positive_transition_notifies_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));
    seed_state(&store, &[("bids", 0)]).await;

    let fetcher = MockFetcher::new().with_page("https://example.com/bids", listings_page(5));
    let notifier = MockNotifier::new();

    let monitor = Monitor::new(fetcher, notifier.clone(), store);
    let report = monitor.run(&[page("bids")]).await.unwrap();

    assert_eq!(report.pages_checked, 1);
    assert_eq!(report.notifications_sent, 1);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].page_id, "bids");
    assert_eq!(sent[0].count, 5);

    let saved = JsonFileStore::new(dir.path().join("state.json"))
        .load()
        .await
        .unwrap();
    assert_eq!(saved.get("bids"), Some(&5));
}

#[tokio::test]
async fn first_observation_is_silent_but_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));

    let fetcher = MockFetcher::new().with_page("https://example.com/bids", listings_page(5));
    let notifier = MockNotifier::new();

    let monitor = Monitor::new(fetcher, notifier.clone(), store);
    let report = monitor.run(&[page("bids")]).await.unwrap();

    assert_eq!(report.notifications_sent, 0);
    assert!(notifier.sent().is_empty());

    let saved = JsonFileStore::new(dir.path().join("state.json"))
        .load()
        .await
        .unwrap();
    assert_eq!(saved.get("bids"), Some(&5));
}

#[tokio::test]
async fn positive_to_positive_transition_is_silent() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));
    seed_state(&store, &[("bids", 3)]).await;

    let fetcher = MockFetcher::new().with_page("https://example.com/bids", listings_page(7));
    let notifier = MockNotifier::new();

    let monitor = Monitor::new(fetcher, notifier.clone(), store);
    monitor.run(&[page("bids")]).await.unwrap();

    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn extraction_failure_keeps_previous_state_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));
    seed_state(&store, &[("front", 7), ("bids", 0)]).await;

    let fetcher = MockFetcher::new()
        .with_page(
            "https://example.com/front",
            "<html><body><main><p>maintenance</p></main></body></html>",
        )
        .with_page("https://example.com/bids", listings_page(2));
    let notifier = MockNotifier::new();

    let monitor = Monitor::new(fetcher, notifier.clone(), store);
    let report = monitor.run(&[page("front"), page("bids")]).await.unwrap();

    assert_eq!(report.pages_checked, 2);
    assert_eq!(report.counts_extracted, 1);
    assert_eq!(report.notifications_sent, 1);

    let saved = JsonFileStore::new(dir.path().join("state.json"))
        .load()
        .await
        .unwrap();
    // The unreadable page keeps its old count, the readable one advances.
    assert_eq!(saved.get("front"), Some(&7));
    assert_eq!(saved.get("bids"), Some(&2));
}

#[tokio::test]
async fn fetch_failure_aborts_without_persisting() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));
    seed_state(&store, &[("bids", 0)]).await;

    let fetcher = MockFetcher::new().failing("https://example.com/bids");
    let notifier = MockNotifier::new();

    let monitor = Monitor::new(fetcher, notifier.clone(), store);
    assert!(monitor.run(&[page("bids")]).await.is_err());
    assert!(notifier.sent().is_empty());

    let saved = JsonFileStore::new(dir.path().join("state.json"))
        .load()
        .await
        .unwrap();
    assert_eq!(saved.get("bids"), Some(&0));
}

#[tokio::test]
async fn notification_failure_still_records_the_new_count() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));
    seed_state(&store, &[("bids", 0)]).await;

    let fetcher = MockFetcher::new().with_page("https://example.com/bids", listings_page(4));
    let notifier = MockNotifier::failing();

    let monitor = Monitor::new(fetcher, notifier, store);
    let report = monitor.run(&[page("bids")]).await.unwrap();

    assert_eq!(report.notifications_sent, 0);

    let saved = JsonFileStore::new(dir.path().join("state.json"))
        .load()
        .await
        .unwrap();
    assert_eq!(saved.get("bids"), Some(&4));
}

#[tokio::test]
async fn pages_are_checked_in_watchlist_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("state.json"));
    seed_state(&store, &[("a", 0), ("b", 0)]).await;

    let fetcher = MockFetcher::new()
        .with_page("https://example.com/a", listings_page(1))
        .with_page("https://example.com/b", listings_page(2));
    let notifier = MockNotifier::new();

    let monitor = Monitor::new(fetcher, notifier.clone(), store);
    monitor.run(&[page("a"), page("b")]).await.unwrap();

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].page_id, "a");
    assert_eq!(sent[1].page_id, "b");
}
