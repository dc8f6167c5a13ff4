//! Smartmark backend boundary.
//!
//! Everything the application consumes from the managed backend — identity
//! lookup, bookmark row storage, and the live change feed — is expressed as
//! traits here. `HttpBackend` is the production implementation; tests and the
//! demo binary use `MemoryBackend`.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use smartmark::backend::{Backend, HttpBackend};
//! use smartmark::config::Config;
//!
//! let config = Config::from_env().expect("missing configuration");
//! let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(config));
//! ```

pub mod client;
pub mod feed;
pub mod memory;

use async_trait::async_trait;

use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::errors::{AuthError, FeedError, StoreError};
use feed::Subscription;

/// Identity provider boundary.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Asks the identity provider for the current caller.
    ///
    /// Returns `Ok(None)` when nobody is signed in. Errors are reserved for
    /// transport or provider failures; callers that cannot distinguish a
    /// failed lookup from a signed-out state may downgrade them.
    async fn current_account(&self) -> Result<Option<String>, AuthError>;

    /// Assembles the OAuth authorize URL for the given provider and
    /// post-login redirect address. The environment performs the actual
    /// navigation; this only initiates it.
    fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, AuthError>;
}

/// Row-oriented bookmark storage boundary.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Creates one bookmark row and returns it as stored, with the
    /// backend-assigned id and creation timestamp.
    async fn insert_bookmark(&self, new: &NewBookmark) -> Result<Bookmark, StoreError>;

    /// Fetches every bookmark owned by `account_id`, newest first.
    async fn list_bookmarks(&self, account_id: &str) -> Result<Vec<Bookmark>, StoreError>;

    /// Deletes the bookmark with the given id.
    async fn delete_bookmark(&self, id: &str) -> Result<(), StoreError>;
}

/// Live change feed boundary.
#[async_trait]
pub trait ChangeFeed: Send + Sync {
    /// Opens one standing subscription delivering insert/delete events for
    /// rows owned by `account_id`. The filter is applied before delivery:
    /// rows of other accounts never reach the subscription.
    async fn subscribe(&self, account_id: &str) -> Result<Subscription, FeedError>;
}

/// The full backend surface, so components can hold a single shared handle.
pub trait Backend: AuthApi + BookmarkStore + ChangeFeed {}

impl<T: AuthApi + BookmarkStore + ChangeFeed> Backend for T {}

pub use client::HttpBackend;
pub use memory::MemoryBackend;
