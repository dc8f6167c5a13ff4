use serde::{Deserialize, Serialize};

/// A saved bookmark row, as stored by the backend.
///
/// `id` and `created_at` are backend-assigned. `created_at` is epoch
/// milliseconds and is used only for ordering (newest first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub account_id: String,
    pub title: String,
    pub url: String,
    pub created_at: i64,
}

/// Insert payload for a new bookmark. The backend assigns `id` and
/// `created_at` and returns the full row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookmark {
    pub account_id: String,
    pub title: String,
    pub url: String,
}
