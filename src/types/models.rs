use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A wiki page: markdown body addressed by a slug derived from its title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub title: String,
    /// URL identifier, unique across all pages. Re-derived from the title
    /// on every edit.
    pub slug: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An immutable snapshot of a page's body as it was before an edit
/// overwrote it. Created only when an edit actually changes the content;
/// deleted only when the owning page is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revision {
    pub id: i64,
    pub page_id: i64,
    pub content: String,
    /// When the edit that superseded this content was committed.
    pub created_at: DateTime<Utc>,
}
