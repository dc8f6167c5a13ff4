//! Unit tests for the in-memory backend.
//!
//! Exercises the full backend boundary — identity, row storage, and the
//! account-filtered change feed — through the same traits the components use.

use smartmark::backend::{AuthApi, BookmarkStore, ChangeFeed, MemoryBackend};
use smartmark::types::bookmark::NewBookmark;
use smartmark::types::change::ChangeEvent;
use smartmark::types::errors::StoreError;

fn new_bookmark(account_id: &str, title: &str, url: &str) -> NewBookmark {
    NewBookmark {
        account_id: account_id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
    }
}

/// Identity resolves to the configured account, or to nobody.
#[tokio::test]
async fn test_current_account_reflects_construction() {
    let signed_in = MemoryBackend::signed_in("acct-1");
    assert_eq!(
        signed_in.current_account().await.unwrap(),
        Some("acct-1".to_string())
    );

    let signed_out = MemoryBackend::signed_out();
    assert_eq!(signed_out.current_account().await.unwrap(), None);
}

/// Insert assigns a fresh id and creation stamp and returns the stored row.
#[tokio::test]
async fn test_insert_returns_backend_assigned_row() {
    let backend = MemoryBackend::signed_in("acct-1");

    let first = backend
        .insert_bookmark(&new_bookmark("acct-1", "Rust", "https://rust-lang.org"))
        .await
        .unwrap();
    let second = backend
        .insert_bookmark(&new_bookmark("acct-1", "Crates", "https://crates.io"))
        .await
        .unwrap();

    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id);
    assert!(second.created_at > first.created_at);
    assert_eq!(first.title, "Rust");
    assert_eq!(first.account_id, "acct-1");
}

/// Listing returns only the requested account's rows, newest first.
#[tokio::test]
async fn test_list_filters_by_account_and_orders_newest_first() {
    let backend = MemoryBackend::signed_in("acct-1");

    let a = backend
        .insert_bookmark(&new_bookmark("acct-1", "A", "https://a.example"))
        .await
        .unwrap();
    let _other = backend
        .insert_bookmark(&new_bookmark("acct-2", "Other", "https://other.example"))
        .await
        .unwrap();
    let b = backend
        .insert_bookmark(&new_bookmark("acct-1", "B", "https://b.example"))
        .await
        .unwrap();

    let rows = backend.list_bookmarks("acct-1").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, b.id, "newest row must come first");
    assert_eq!(rows[1].id, a.id);
}

/// Delete removes the row; deleting an unknown id is a backend error.
#[tokio::test]
async fn test_delete_removes_row() {
    let backend = MemoryBackend::signed_in("acct-1");
    let row = backend
        .insert_bookmark(&new_bookmark("acct-1", "A", "https://a.example"))
        .await
        .unwrap();

    backend.delete_bookmark(&row.id).await.unwrap();
    assert!(backend.list_bookmarks("acct-1").await.unwrap().is_empty());

    match backend.delete_bookmark(&row.id).await {
        Err(StoreError::Backend(msg)) => assert!(msg.contains(&row.id)),
        other => panic!("expected backend error, got {:?}", other),
    }
}

/// Subscribers receive insert and delete events for their own account, with
/// the full changed row as payload.
#[tokio::test]
async fn test_feed_delivers_changes_for_subscribed_account() {
    let backend = MemoryBackend::signed_in("acct-1");
    let mut subscription = backend.subscribe("acct-1").await.unwrap();

    let row = backend
        .insert_bookmark(&new_bookmark("acct-1", "A", "https://a.example"))
        .await
        .unwrap();
    backend.delete_bookmark(&row.id).await.unwrap();

    match subscription.try_next() {
        Some(ChangeEvent::Inserted(inserted)) => assert_eq!(inserted, row),
        other => panic!("expected insert event, got {:?}", other),
    }
    match subscription.try_next() {
        Some(ChangeEvent::Deleted(deleted)) => assert_eq!(deleted.id, row.id),
        other => panic!("expected delete event, got {:?}", other),
    }
    assert!(subscription.try_next().is_none());
}

/// Filter correctness: another account's rows never reach the subscription.
#[tokio::test]
async fn test_feed_never_delivers_other_accounts_rows() {
    let backend = MemoryBackend::signed_in("acct-1");
    let mut subscription = backend.subscribe("acct-1").await.unwrap();

    let other = backend
        .insert_bookmark(&new_bookmark("acct-2", "Other", "https://other.example"))
        .await
        .unwrap();
    backend.delete_bookmark(&other.id).await.unwrap();

    assert!(subscription.try_next().is_none());
}

/// A closed subscription stops receiving; a second subscription on the same
/// account is unaffected.
#[tokio::test]
async fn test_closed_subscription_stops_receiving() {
    let backend = MemoryBackend::signed_in("acct-1");
    let first = backend.subscribe("acct-1").await.unwrap();
    let mut second = backend.subscribe("acct-1").await.unwrap();

    first.close();
    backend
        .insert_bookmark(&new_bookmark("acct-1", "A", "https://a.example"))
        .await
        .unwrap();

    assert!(matches!(
        second.try_next(),
        Some(ChangeEvent::Inserted(_))
    ));
    assert!(second.try_next().is_none());
}

/// Seeded rows bypass the feed entirely.
#[tokio::test]
async fn test_seed_row_is_silent() {
    let backend = MemoryBackend::signed_in("acct-1");
    let mut subscription = backend.subscribe("acct-1").await.unwrap();

    backend.seed_row(smartmark::types::bookmark::Bookmark {
        id: "seeded".to_string(),
        account_id: "acct-1".to_string(),
        title: "Seeded".to_string(),
        url: "example.com".to_string(),
        created_at: 99,
    });

    assert!(subscription.try_next().is_none());
    assert_eq!(backend.row_count(), 1);
}
