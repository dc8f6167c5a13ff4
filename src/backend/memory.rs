//! In-memory backend for tests and the demo binary.
//!
//! Plays the role an in-memory database plays elsewhere: the full backend
//! boundary with no process leaving the building. Rows live in a `Mutex`,
//! ids are freshly generated, and the change feed fans out to subscribers —
//! filtered by owning account before delivery, exactly as the managed
//! backend filters server-side.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::change::ChangeEvent;
use crate::types::errors::{AuthError, FeedError, StoreError};

use super::feed::Subscription;
use super::{AuthApi, BookmarkStore, ChangeFeed};

struct Inner {
    /// Rows in insertion order; listings return them reversed.
    rows: Vec<Bookmark>,
    /// Account-scoped feed subscribers.
    subscribers: Vec<(String, mpsc::UnboundedSender<ChangeEvent>)>,
    /// Monotonic creation stamp so descending order is total.
    next_stamp: i64,
}

/// In-memory implementation of the full backend boundary.
pub struct MemoryBackend {
    account: Option<String>,
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    /// Backend whose identity provider reports `account` as signed in.
    pub fn signed_in(account: &str) -> Self {
        Self::with_account(Some(account.to_string()))
    }

    /// Backend with nobody signed in.
    pub fn signed_out() -> Self {
        Self::with_account(None)
    }

    fn with_account(account: Option<String>) -> Self {
        Self {
            account,
            inner: Mutex::new(Inner {
                rows: Vec::new(),
                subscribers: Vec::new(),
                next_stamp: 1,
            }),
        }
    }

    /// Number of rows currently stored, across all accounts.
    pub fn row_count(&self) -> usize {
        self.lock().rows.len()
    }

    /// Inserts a row directly, bypassing id/timestamp assignment and feed
    /// delivery. Lets tests seed state that never passed through the writer,
    /// e.g. rows with scheme-less URLs.
    pub fn seed_row(&self, row: Bookmark) {
        self.lock().rows.push(row);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock still holds valid rows.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(inner: &mut Inner, event: ChangeEvent) {
        let account_id = match &event {
            ChangeEvent::Inserted(row) | ChangeEvent::Deleted(row) => row.account_id.clone(),
        };
        inner.subscribers.retain(|(account, sender)| {
            if *account != account_id {
                return !sender.is_closed();
            }
            sender.send(event.clone()).is_ok()
        });
    }
}

#[async_trait]
impl AuthApi for MemoryBackend {
    async fn current_account(&self) -> Result<Option<String>, AuthError> {
        Ok(self.account.clone())
    }

    fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, AuthError> {
        if provider.trim().is_empty() {
            return Err(AuthError::Provider("No OAuth provider named".to_string()));
        }
        if redirect_to.trim().is_empty() {
            return Err(AuthError::InvalidRedirect(
                "Redirect address is empty".to_string(),
            ));
        }
        Ok(format!(
            "memory://authorize?provider={}&redirect_to={}",
            provider, redirect_to
        ))
    }
}

#[async_trait]
impl BookmarkStore for MemoryBackend {
    async fn insert_bookmark(&self, new: &NewBookmark) -> Result<Bookmark, StoreError> {
        let mut inner = self.lock();
        let row = Bookmark {
            id: Uuid::new_v4().to_string(),
            account_id: new.account_id.clone(),
            title: new.title.clone(),
            url: new.url.clone(),
            created_at: inner.next_stamp,
        };
        inner.next_stamp += 1;
        inner.rows.push(row.clone());
        Self::publish(&mut inner, ChangeEvent::Inserted(row.clone()));
        Ok(row)
    }

    async fn list_bookmarks(&self, account_id: &str) -> Result<Vec<Bookmark>, StoreError> {
        let inner = self.lock();
        let mut rows: Vec<Bookmark> = inner
            .rows
            .iter()
            .filter(|row| row.account_id == account_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn delete_bookmark(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let Some(index) = inner.rows.iter().position(|row| row.id == id) else {
            return Err(StoreError::Backend(format!("Bookmark not found: {}", id)));
        };
        let row = inner.rows.remove(index);
        Self::publish(&mut inner, ChangeEvent::Deleted(row));
        Ok(())
    }
}

#[async_trait]
impl ChangeFeed for MemoryBackend {
    async fn subscribe(&self, account_id: &str) -> Result<Subscription, FeedError> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock()
            .subscribers
            .push((account_id.to_string(), tx));
        // Dropping the receiver closes the sender; the registry prunes closed
        // senders on the next publish. Nothing further to cancel.
        Ok(Subscription::new(rx, || {}))
    }
}
