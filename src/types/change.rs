use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;

/// A single change delivered by the live feed.
///
/// The feed always carries the full changed row: the new row for an insert,
/// the old row for a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "row", rename_all = "snake_case")]
pub enum ChangeEvent {
    /// A row was inserted for the subscribed account.
    Inserted(Bookmark),
    /// A row was deleted for the subscribed account.
    Deleted(Bookmark),
}
