use serde::Deserialize;

/// Body of the create and edit forms.
#[derive(Debug, Deserialize)]
pub struct PageForm {
    pub title: String,
    pub content: String,
}

/// Query string of `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}
