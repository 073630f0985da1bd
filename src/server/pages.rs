use std::sync::Arc;

use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use chrono::Utc;

use crate::markup::render_markdown;
use crate::server::AppState;
use crate::server::forms::{PageForm, SearchParams};
use crate::server::response::{PageError, StoreOptionExt};
use crate::server::validation::{validate_slug, validate_title};
use crate::server::views;
use crate::slug::slugify;
use crate::types::Page;

fn page_url(slug: &str) -> String {
    format!("/page/{}", urlencoding::encode(slug))
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let pages = state.store.list_pages()?;
    Ok(Html(views::index(&pages)))
}

pub async fn view_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let page = state
        .store
        .get_page_by_slug(&slug)?
        .or_not_found("Page not found")?;

    let rendered = render_markdown(&page.content);
    let revision_count = state.store.list_revisions(page.id)?.len();
    Ok(Html(views::page(&page, &rendered, revision_count)))
}

pub async fn new_page_form() -> Html<String> {
    Html(views::editor("Create a new page", "/create", "", ""))
}

pub async fn create_page(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PageForm>,
) -> Result<Redirect, PageError> {
    let title = validate_title(&form.title)?;
    let slug = slugify(title);
    validate_slug(&slug)?;

    if state.store.get_page_by_slug(&slug)?.is_some() {
        return Err(PageError::conflict(format!(
            "A page with a similar title already exists (slug '{slug}'). \
             Edit that page instead of creating a new one."
        )));
    }

    let page = state
        .store
        .create_page(title, &slug, &form.content, Utc::now())?;
    tracing::info!("created page '{}' ({})", page.title, page.slug);

    Ok(Redirect::to(&page_url(&page.slug)))
}

pub async fn edit_page_form(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let page = state
        .store
        .get_page_by_slug(&slug)?
        .or_not_found("Page not found")?;

    let heading = format!("Edit: {}", page.title);
    let action = format!("/edit/{}", urlencoding::encode(&page.slug));
    Ok(Html(views::editor(
        &heading,
        &action,
        &page.title,
        &page.content,
    )))
}

pub async fn update_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Form(form): Form<PageForm>,
) -> Result<Redirect, PageError> {
    let page = state
        .store
        .get_page_by_slug(&slug)?
        .or_not_found("Page not found")?;

    let title = validate_title(&form.title)?;
    let new_slug = slugify(title);
    validate_slug(&new_slug)?;

    if new_slug != page.slug && slug_belongs_to_other_page(&state, &new_slug, page.id)? {
        return Err(PageError::conflict(format!(
            "The new title produces slug '{new_slug}', which is already used \
             by another page."
        )));
    }

    // The store snapshots the old content as a revision (when it changed)
    // and updates the page in one transaction.
    let page = state
        .store
        .update_page(&page, title, &new_slug, &form.content, Utc::now())?;
    tracing::info!("updated page '{}' ({})", page.title, page.slug);

    Ok(Redirect::to(&page_url(&page.slug)))
}

fn slug_belongs_to_other_page(
    state: &AppState,
    slug: &str,
    page_id: i64,
) -> Result<bool, PageError> {
    Ok(state
        .store
        .get_page_by_slug(slug)?
        .is_some_and(|other: Page| other.id != page_id))
}

pub async fn delete_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Redirect, PageError> {
    let page = state
        .store
        .get_page_by_slug(&slug)?
        .or_not_found("Page not found")?;

    state.store.delete_page(page.id)?;
    tracing::info!("deleted page '{}' ({})", page.title, page.slug);

    Ok(Redirect::to("/"))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, PageError> {
    let term = params.q.trim();
    let pages = state.store.search_pages(term)?;
    Ok(Html(views::search_results(term, &pages)))
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let page = state
        .store
        .get_page_by_slug(&slug)?
        .or_not_found("Page not found")?;

    let revisions = state.store.list_revisions(page.id)?;
    Ok(Html(views::history(&page, &revisions)))
}

pub async fn view_revision(
    State(state): State<Arc<AppState>>,
    Path((slug, revision_id)): Path<(String, i64)>,
) -> Result<Html<String>, PageError> {
    let page = state
        .store
        .get_page_by_slug(&slug)?
        .or_not_found("Page not found")?;

    let revision = state
        .store
        .get_revision(page.id, revision_id)?
        .or_not_found("Revision not found")?;

    let rendered = render_markdown(&revision.content);
    Ok(Html(views::revision(&page, &revision, &rendered)))
}
