//! Bookmark Synchronizer for Smartmark.
//!
//! Owns the local bookmark list: snapshot fetch, live-feed reconciliation,
//! and optimistic delete with a compensating resync when the backend rejects
//! the delete. The list mirrors backend state with eventual consistency and
//! is mutated only through `&mut self`.

use std::sync::Arc;

use crate::backend::feed::Subscription;
use crate::backend::Backend;
use crate::types::bookmark::Bookmark;
use crate::types::change::ChangeEvent;
use crate::types::errors::StoreError;

/// Account-scoped bookmark list kept aligned with the backend.
pub struct BookmarkSynchronizer {
    backend: Arc<dyn Backend>,
    account_id: String,
    bookmarks: Vec<Bookmark>,
    loading: bool,
    error: Option<String>,
    subscription: Option<Subscription>,
}

impl BookmarkSynchronizer {
    pub fn new(backend: Arc<dyn Backend>, account_id: &str) -> Self {
        Self {
            backend,
            account_id: account_id.to_string(),
            bookmarks: Vec::new(),
            loading: false,
            error: None,
            subscription: None,
        }
    }

    /// The local list, newest first.
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// True while the snapshot fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last backend failure message, surfaced to the user verbatim.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_subscription(&self) -> bool {
        self.subscription.is_some()
    }

    /// Snapshot, then subscribe: fetches the current rows and only then opens
    /// the standing subscription for subsequent changes.
    pub async fn start(&mut self) {
        self.refresh().await;
        match self.backend.subscribe(&self.account_id).await {
            Ok(subscription) => self.subscription = Some(subscription),
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Fetches the account's rows, newest first, replacing the local list
    /// wholesale. On failure the message is stored and the list keeps its
    /// previous value.
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.backend.list_bookmarks(&self.account_id).await {
            Ok(rows) => {
                self.bookmarks = rows;
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
    }

    /// Applies one feed event to the local list.
    ///
    /// Inserts prepend unconditionally; a duplicate delivery would visibly
    /// duplicate the entry. Deletes remove the matching id — at most one
    /// entry, and nothing when the id is already absent (as after our own
    /// optimistic delete).
    pub fn apply_event(&mut self, event: ChangeEvent) {
        match event {
            ChangeEvent::Inserted(row) => self.bookmarks.insert(0, row),
            ChangeEvent::Deleted(row) => self.bookmarks.retain(|b| b.id != row.id),
        }
    }

    /// Drains buffered feed events and applies them. Returns how many events
    /// were applied. A render loop calls this once per frame.
    pub fn pump_events(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self
            .subscription
            .as_mut()
            .and_then(|subscription| subscription.try_next())
        {
            self.apply_event(event);
            applied += 1;
        }
        applied
    }

    /// Waits for one feed event and applies it. Returns `false` when no
    /// subscription is open or the feed has closed.
    pub async fn next_change(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        match subscription.next_event().await {
            Some(event) => {
                self.apply_event(event);
                true
            }
            None => false,
        }
    }

    /// Deletes a bookmark, optimistically.
    ///
    /// The local entry is removed before the backend is asked. If the backend
    /// rejects the delete, the message is stored and a full refresh resyncs
    /// the list with backend truth; a successful resync clears the stored
    /// message again, and the returned error is the caller's surface. On
    /// success nothing further happens; the feed's own delete event for this
    /// id is a no-op.
    pub async fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.bookmarks.retain(|b| b.id != id);

        match self.backend.delete_bookmark(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                self.error = Some(err.to_string());
                self.refresh().await;
                Err(err)
            }
        }
    }

    /// Switches to another account: the old subscription is closed before
    /// interest in the new account is established, so no feed stays bound to
    /// a stale account.
    pub async fn set_account(&mut self, account_id: &str) {
        self.close();
        self.account_id = account_id.to_string();
        self.bookmarks.clear();
        self.error = None;
        self.start().await;
    }

    /// Tears the subscription down explicitly. Also runs on drop.
    pub fn close(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.close();
        }
    }

    /// Render-time safeguard for the clickable link: rows inserted directly
    /// at the backend may lack a scheme, so anything not starting with `http`
    /// gets `https://` prefixed for display.
    pub fn display_url(bookmark: &Bookmark) -> String {
        if bookmark.url.starts_with("http") {
            bookmark.url.clone()
        } else {
            format!("https://{}", bookmark.url)
        }
    }
}
