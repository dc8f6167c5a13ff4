//! Unit tests for the App composition root.
//!
//! Verifies that account-scoped components are mounted only behind a
//! resolved session, and that a writer's create reaches the synchronizer
//! through the live feed when both are composed together.

use std::sync::Arc;

use smartmark::app::App;
use smartmark::backend::MemoryBackend;
use smartmark::components::session_gate::SessionState;
use smartmark::config::Config;

fn config() -> Config {
    Config::new(
        "https://backend.example.com",
        "anon-key",
        "https://app.example.com/callback",
    )
}

/// Signed out: the session resolves but nothing account-scoped is mounted.
#[tokio::test]
async fn test_signed_out_mounts_nothing() {
    let mut app = App::new(Arc::new(MemoryBackend::signed_out()), config());
    app.startup().await;

    assert_eq!(*app.session.state(), SessionState::SignedOut);
    assert!(app.dashboard.is_none());
}

/// Signed in: the dashboard mounts with the resolved account and the
/// synchronizer has loaded and subscribed.
#[tokio::test]
async fn test_signed_in_mounts_dashboard() {
    let mut app = App::new(Arc::new(MemoryBackend::signed_in("acct-1")), config());
    app.startup().await;

    assert_eq!(app.session.account_id(), Some("acct-1"));
    let dashboard = app.dashboard.as_ref().expect("dashboard should be mounted");
    assert_eq!(dashboard.list.account_id(), "acct-1");
    assert!(dashboard.list.has_subscription());
}

/// Writer and synchronizer converge through the backend: the created row
/// arrives at the list via the live feed, not via a direct call.
#[tokio::test]
async fn test_created_row_reaches_list_via_feed() {
    let mut app = App::new(Arc::new(MemoryBackend::signed_in("acct-1")), config());
    app.startup().await;

    let dashboard = app.dashboard.as_mut().unwrap();
    dashboard.writer.set_title("Example");
    dashboard.writer.set_url("example.com");
    let created = dashboard.writer.submit("acct-1").await.unwrap();

    // Not visible until the feed event is pumped.
    assert!(dashboard.list.bookmarks().is_empty());
    assert_eq!(dashboard.list.pump_events(), 1);
    assert_eq!(dashboard.list.bookmarks(), &[created]);
}

/// Shutdown unmounts the dashboard and closes the subscription.
#[tokio::test]
async fn test_shutdown_unmounts() {
    let mut app = App::new(Arc::new(MemoryBackend::signed_in("acct-1")), config());
    app.startup().await;
    assert!(app.dashboard.is_some());

    app.shutdown();
    assert!(app.dashboard.is_none());
}

/// Re-resolving an unchanged session keeps the mounted dashboard.
#[tokio::test]
async fn test_refresh_keeps_dashboard_for_same_account() {
    let backend = Arc::new(MemoryBackend::signed_in("acct-1"));
    let mut app = App::new(backend, config());
    app.startup().await;

    app.refresh_session().await;
    assert!(app.dashboard.is_some());
    assert_eq!(app.dashboard.as_ref().unwrap().list.account_id(), "acct-1");
}
