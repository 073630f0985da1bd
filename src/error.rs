use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("not found")]
    NotFound,

    #[error("a page with slug '{0}' already exists")]
    SlugTaken(String),
}

pub type Result<T> = std::result::Result<T, Error>;
