use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::Error;

/// Request-level error that converts to a plain-text HTTP response.
pub struct PageError {
    pub status: StatusCode,
    pub message: String,
}

impl PageError {
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<Error> for PageError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound => Self::not_found("Page not found"),
            Error::SlugTaken(slug) => Self::conflict(format!(
                "A page with a similar title already exists (slug '{slug}'). \
                 Edit that page instead of creating a new one."
            )),
            other => {
                tracing::error!("store error: {other}");
                Self::internal("Internal server error")
            }
        }
    }
}

/// Extension for Option types from store lookups.
pub trait StoreOptionExt<T> {
    fn or_not_found(self, message: &'static str) -> Result<T, PageError>;
}

impl<T> StoreOptionExt<T> for Option<T> {
    fn or_not_found(self, message: &'static str) -> Result<T, PageError> {
        self.ok_or_else(|| PageError::not_found(message))
    }
}
