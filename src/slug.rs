//! Title-to-slug normalization.
//!
//! A slug is the URL identifier of a page: lowercase, hyphen-delimited, and
//! derived deterministically from the page title. Unicode letters are kept
//! as-is rather than transliterated; non-ASCII slugs are percent-encoded at
//! the URL layer, not here.

/// Normalize a page title into a slug.
///
/// Keeps alphanumerics, whitespace, and hyphens; drops everything else;
/// lowercases; collapses any run of whitespace and/or hyphens into a single
/// hyphen. Total over all inputs — the result may be empty, and callers must
/// reject empty or already-taken slugs before storing anything.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
        // Anything else (punctuation, symbols) is dropped without
        // acting as a separator, matching how "Don't" becomes "dont".
    }

    slug
}
