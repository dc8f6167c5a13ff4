//! Bookmark Writer for Smartmark.
//!
//! Holds the title/URL input buffers, validates them, normalizes the URL to
//! an absolute form, and submits one create request scoped to the current
//! account. The created row is returned to the caller, which may merge it
//! locally or rely on the live feed to deliver it.

use std::sync::Arc;

use crate::backend::Backend;
use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::errors::WriterError;

/// Normalizes raw URL input: trims surrounding whitespace, and unless the
/// result already starts with `http://` or `https://`, prefixes `https://`.
/// Applied unconditionally — the result is not checked for well-formedness.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Create-form state and submit orchestration.
pub struct BookmarkWriter {
    backend: Arc<dyn Backend>,
    title: String,
    url: String,
    in_flight: bool,
    error: Option<String>,
}

impl BookmarkWriter {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            title: String::new(),
            url: String::new(),
            in_flight: false,
            error: None,
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// True while a create request is outstanding; the submit control is
    /// disabled and relabeled during this window.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Last submit failure, surfaced to the user verbatim.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submits one create request for the given account.
    ///
    /// Empty (after trimming) title or URL fails immediately without any
    /// backend call. On backend failure the input buffers are left unchanged
    /// and the raw message is stored. On success both buffers are cleared and
    /// the created row is returned.
    pub async fn submit(&mut self, account_id: &str) -> Result<Bookmark, WriterError> {
        if self.title.trim().is_empty() {
            self.error = Some(WriterError::EmptyTitle.to_string());
            return Err(WriterError::EmptyTitle);
        }
        if self.url.trim().is_empty() {
            self.error = Some(WriterError::EmptyUrl.to_string());
            return Err(WriterError::EmptyUrl);
        }

        let new = NewBookmark {
            account_id: account_id.to_string(),
            title: self.title.clone(),
            url: normalize_url(&self.url),
        };

        self.in_flight = true;
        let result = self.backend.insert_bookmark(&new).await;
        self.in_flight = false;

        match result {
            Ok(row) => {
                self.title.clear();
                self.url.clear();
                self.error = None;
                Ok(row)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }
}
