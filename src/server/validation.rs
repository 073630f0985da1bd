use crate::server::response::PageError;

const MAX_TITLE_LEN: usize = 100;

/// Check a submitted page title before anything touches the store.
/// Returns the trimmed title.
pub fn validate_title(title: &str) -> Result<&str, PageError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(PageError::bad_request("Title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(PageError::bad_request(format!(
            "Title cannot exceed {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title)
}

/// Reject slugs that came out of normalization empty. A title made of
/// nothing but punctuation has no usable URL identity.
pub fn validate_slug(slug: &str) -> Result<(), PageError> {
    if slug.is_empty() {
        return Err(PageError::bad_request(
            "Title must contain at least one letter or digit",
        ));
    }
    Ok(())
}
