mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
///
/// All page mutations keep two invariants: the slug stays unique across the
/// live page set, and an edit that changes content records the previous body
/// as a revision in the same transaction as the page update.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Page operations
    fn create_page(
        &self,
        title: &str,
        slug: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Page>;
    fn get_page_by_slug(&self, slug: &str) -> Result<Option<Page>>;
    fn get_page_by_id(&self, id: i64) -> Result<Option<Page>>;
    fn list_pages(&self) -> Result<Vec<Page>>;
    /// Apply an edit: if `content` differs from the page's current content,
    /// insert a revision holding the old body, then update title, slug,
    /// content, and `updated_at` — all in one transaction.
    fn update_page(
        &self,
        page: &Page,
        title: &str,
        slug: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Page>;
    fn delete_page(&self, id: i64) -> Result<bool>;

    // Revision operations
    fn create_revision(&self, page_id: i64, content: &str, now: DateTime<Utc>)
    -> Result<Revision>;
    fn list_revisions(&self, page_id: i64) -> Result<Vec<Revision>>;
    fn get_revision(&self, page_id: i64, revision_id: i64) -> Result<Option<Revision>>;

    // Search
    /// Case-insensitive substring match over title or content, newest
    /// update first. An empty or whitespace-only term matches nothing.
    fn search_pages(&self, term: &str) -> Result<Vec<Page>>;
}
