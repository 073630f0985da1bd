use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn page_from_row(row: &Row<'_>) -> rusqlite::Result<Page> {
    Ok(Page {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        content: row.get(3)?,
        created_at: parse_datetime(&row.get::<_, String>(4)?),
        updated_at: parse_datetime(&row.get::<_, String>(5)?),
    })
}

fn revision_from_row(row: &Row<'_>) -> rusqlite::Result<Revision> {
    Ok(Revision {
        id: row.get(0)?,
        page_id: row.get(1)?,
        content: row.get(2)?,
        created_at: parse_datetime(&row.get::<_, String>(3)?),
    })
}

const PAGE_COLUMNS: &str = "id, title, slug, content, created_at, updated_at";

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Page operations

    fn create_page(
        &self,
        title: &str,
        slug: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Page> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO pages (title, slug, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                title,
                slug,
                content,
                format_datetime(&now),
                format_datetime(&now),
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::SlugTaken(slug.to_string())
            } else {
                Error::from(e)
            }
        })?;

        Ok(Page {
            id: conn.last_insert_rowid(),
            title: title.to_string(),
            slug: slug.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    fn get_page_by_slug(&self, slug: &str) -> Result<Option<Page>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {PAGE_COLUMNS} FROM pages WHERE slug = ?1"),
            params![slug],
            page_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn get_page_by_id(&self, id: i64) -> Result<Option<Page>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {PAGE_COLUMNS} FROM pages WHERE id = ?1"),
            params![id],
            page_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_pages(&self) -> Result<Vec<Page>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PAGE_COLUMNS} FROM pages ORDER BY updated_at DESC, id DESC"
        ))?;

        let rows = stmt.query_map([], page_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_page(
        &self,
        page: &Page,
        title: &str,
        slug: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Page> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        // Snapshot the outgoing body first so a failed page update cannot
        // leave a revision behind, and vice versa.
        if content != page.content {
            tx.execute(
                "INSERT INTO revisions (page_id, content, created_at) VALUES (?1, ?2, ?3)",
                params![page.id, page.content, format_datetime(&now)],
            )?;
        }

        let rows = tx
            .execute(
                "UPDATE pages SET title = ?1, slug = ?2, content = ?3, updated_at = ?4
                 WHERE id = ?5",
                params![title, slug, content, format_datetime(&now), page.id],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    Error::SlugTaken(slug.to_string())
                } else {
                    Error::from(e)
                }
            })?;

        if rows == 0 {
            return Err(Error::NotFound);
        }

        tx.commit()?;

        Ok(Page {
            id: page.id,
            title: title.to_string(),
            slug: slug.to_string(),
            content: content.to_string(),
            created_at: page.created_at,
            updated_at: now,
        })
    }

    fn delete_page(&self, id: i64) -> Result<bool> {
        // Revisions go with the page via the ON DELETE CASCADE constraint.
        let rows = self
            .conn()
            .execute("DELETE FROM pages WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Revision operations

    fn create_revision(
        &self,
        page_id: i64,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Revision> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO revisions (page_id, content, created_at) VALUES (?1, ?2, ?3)",
            params![page_id, content, format_datetime(&now)],
        )?;

        Ok(Revision {
            id: conn.last_insert_rowid(),
            page_id,
            content: content.to_string(),
            created_at: now,
        })
    }

    fn list_revisions(&self, page_id: i64) -> Result<Vec<Revision>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, page_id, content, created_at FROM revisions
             WHERE page_id = ?1 ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map(params![page_id], revision_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn get_revision(&self, page_id: i64, revision_id: i64) -> Result<Option<Revision>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, page_id, content, created_at FROM revisions
             WHERE id = ?1 AND page_id = ?2",
            params![revision_id, page_id],
            revision_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    // Search

    fn search_pages(&self, term: &str) -> Result<Vec<Page>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        // LIKE wildcards in the user's term must match literally.
        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("%{escaped}%");

        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            r#"SELECT {PAGE_COLUMNS} FROM pages
               WHERE title LIKE ?1 ESCAPE '\' OR content LIKE ?1 ESCAPE '\'
               ORDER BY updated_at DESC, id DESC"#
        ))?;

        let rows = stmt.query_map(params![pattern], page_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().expect("create temp dir");
        let store = SqliteStore::new(dir.path().join("test.db")).expect("open store");
        store.initialize().expect("initialize schema");
        (dir, store)
    }

    fn add_page(store: &SqliteStore, title: &str, slug: &str, content: &str) -> Page {
        store
            .create_page(title, slug, content, Utc::now())
            .expect("create page")
    }

    #[test]
    fn create_and_fetch_page() {
        let (_dir, store) = test_store();
        let page = add_page(&store, "My First Note", "my-first-note", "hello");

        let by_slug = store
            .get_page_by_slug("my-first-note")
            .unwrap()
            .expect("page by slug");
        assert_eq!(by_slug.id, page.id);
        assert_eq!(by_slug.title, "My First Note");
        assert_eq!(by_slug.content, "hello");
        assert_eq!(by_slug.created_at, by_slug.updated_at);

        let by_id = store.get_page_by_id(page.id).unwrap().expect("page by id");
        assert_eq!(by_id.slug, "my-first-note");

        assert!(store.get_page_by_slug("missing").unwrap().is_none());
    }

    #[test]
    fn duplicate_slug_is_rejected() {
        let (_dir, store) = test_store();
        add_page(&store, "Notes", "notes", "first");

        let err = store
            .create_page("Notes", "notes", "second", Utc::now())
            .unwrap_err();
        assert!(matches!(err, Error::SlugTaken(ref s) if s == "notes"));

        // The first page is untouched.
        let page = store.get_page_by_slug("notes").unwrap().unwrap();
        assert_eq!(page.content, "first");
        assert_eq!(store.list_pages().unwrap().len(), 1);
    }

    #[test]
    fn edit_with_changed_content_records_one_revision() {
        let (_dir, store) = test_store();
        let page = add_page(&store, "Note", "note", "A");

        let page = store
            .update_page(&page, "Note", "note", "B", Utc::now())
            .unwrap();
        let revisions = store.list_revisions(page.id).unwrap();
        assert_eq!(revisions.len(), 1);
        assert_eq!(revisions[0].content, "A");

        let page = store
            .update_page(&page, "Note", "note", "C", Utc::now())
            .unwrap();
        let revisions = store.list_revisions(page.id).unwrap();
        let contents: Vec<&str> = revisions.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, ["B", "A"]);
    }

    #[test]
    fn title_only_edit_records_no_revision() {
        let (_dir, store) = test_store();
        let page = add_page(&store, "Old Title", "old-title", "body");

        let page = store
            .update_page(&page, "New Title", "new-title", "body", Utc::now())
            .unwrap();
        assert_eq!(page.title, "New Title");
        assert_eq!(page.slug, "new-title");
        assert!(store.list_revisions(page.id).unwrap().is_empty());
        assert!(store.get_page_by_slug("old-title").unwrap().is_none());
    }

    #[test]
    fn edit_to_taken_slug_is_rejected() {
        let (_dir, store) = test_store();
        add_page(&store, "First", "first", "one");
        let second = add_page(&store, "Second", "second", "two");

        let err = store
            .update_page(&second, "First", "first", "changed", Utc::now())
            .unwrap_err();
        assert!(matches!(err, Error::SlugTaken(_)));

        // The rejected edit must not have left a revision behind.
        let second = store.get_page_by_id(second.id).unwrap().unwrap();
        assert_eq!(second.content, "two");
        assert!(store.list_revisions(second.id).unwrap().is_empty());
    }

    #[test]
    fn delete_cascades_to_revisions() {
        let (_dir, store) = test_store();
        let page = add_page(&store, "Doomed", "doomed", "v1");
        let page = store
            .update_page(&page, "Doomed", "doomed", "v2", Utc::now())
            .unwrap();
        assert_eq!(store.list_revisions(page.id).unwrap().len(), 1);

        assert!(store.delete_page(page.id).unwrap());
        assert!(store.get_page_by_slug("doomed").unwrap().is_none());
        assert!(store.list_revisions(page.id).unwrap().is_empty());

        // Deleting again reports nothing removed.
        assert!(!store.delete_page(page.id).unwrap());
    }

    #[test]
    fn list_pages_orders_by_updated_at_desc() {
        let (_dir, store) = test_store();
        let base = Utc::now();
        store
            .create_page("Older", "older", "", base - chrono::Duration::minutes(2))
            .unwrap();
        store
            .create_page("Newer", "newer", "", base)
            .unwrap();
        let old = store
            .create_page("Oldest", "oldest", "", base - chrono::Duration::minutes(5))
            .unwrap();

        // Editing bumps a page to the top of the list.
        store
            .update_page(&old, "Oldest", "oldest", "bumped", base + chrono::Duration::minutes(1))
            .unwrap();

        let slugs: Vec<String> = store
            .list_pages()
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, ["oldest", "newer", "older"]);
    }

    #[test]
    fn get_revision_is_scoped_to_its_page() {
        let (_dir, store) = test_store();
        let one = add_page(&store, "One", "one", "a");
        let two = add_page(&store, "Two", "two", "x");
        let rev = store.create_revision(one.id, "a", Utc::now()).unwrap();

        assert!(store.get_revision(one.id, rev.id).unwrap().is_some());
        assert!(store.get_revision(two.id, rev.id).unwrap().is_none());
        assert!(store.get_revision(one.id, rev.id + 100).unwrap().is_none());
    }

    #[test]
    fn search_matches_title_and_content_case_insensitively() {
        let (_dir, store) = test_store();
        add_page(&store, "Rust Notes", "rust-notes", "borrow checker");
        add_page(&store, "Groceries", "groceries", "apples and RUST remover");
        add_page(&store, "Unrelated", "unrelated", "nothing here");

        let slugs: Vec<String> = store
            .search_pages("rust")
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs.len(), 2);
        assert!(slugs.contains(&"rust-notes".to_string()));
        assert!(slugs.contains(&"groceries".to_string()));
    }

    #[test]
    fn search_empty_term_matches_nothing() {
        let (_dir, store) = test_store();
        add_page(&store, "Anything", "anything", "content");

        assert!(store.search_pages("").unwrap().is_empty());
        assert!(store.search_pages("   ").unwrap().is_empty());
    }

    #[test]
    fn search_treats_like_wildcards_literally() {
        let (_dir, store) = test_store();
        add_page(&store, "Percent", "percent", "50% done");
        add_page(&store, "Plain", "plain", "50 done");

        let slugs: Vec<String> = store
            .search_pages("50%")
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, ["percent"]);
    }
}
