use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    Router,
    routing::{get, post},
};

use super::pages;
use crate::store::Store;

pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(pages::index))
        .route("/page/{slug}", get(pages::view_page))
        .route("/create", get(pages::new_page_form).post(pages::create_page))
        .route(
            "/edit/{slug}",
            get(pages::edit_page_form).post(pages::update_page),
        )
        .route("/delete/{slug}", post(pages::delete_page))
        .route("/search", get(pages::search))
        .route("/history/{slug}", get(pages::history))
        .route("/history/{slug}/{revision_id}", get(pages::view_revision))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
