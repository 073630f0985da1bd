pub const SCHEMA: &str = r#"
-- Wiki pages. The slug is the URL identity and must stay unique across
-- the live page set; the store enforces it with the UNIQUE constraint.
CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Revision history. Each row is the body a page had BEFORE an edit that
-- changed it. Rows are never updated, only inserted, and removed solely
-- through the cascade when their page is deleted.
CREATE TABLE IF NOT EXISTS revisions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    page_id INTEGER NOT NULL REFERENCES pages(id) ON DELETE CASCADE,
    content TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Create indexes
CREATE INDEX IF NOT EXISTS idx_revisions_page ON revisions(page_id);
CREATE INDEX IF NOT EXISTS idx_pages_updated ON pages(updated_at);
"#;
