//! HTML page handlers
use super::AppState;
use crate::site::{blog, pages, sitemap};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};

/// Posts shown on the landing page
const LATEST_POSTS: usize = 3;

pub async fn home(State(state): State<AppState>) -> Html<String> {
    let mut latest = state.store.published().await;
    latest.truncate(LATEST_POSTS);
    Html(pages::home(&state.site, &latest))
}

pub async fn about(State(state): State<AppState>) -> Html<String> {
    Html(pages::about(&state.site))
}

pub async fn services(State(state): State<AppState>) -> Html<String> {
    Html(pages::services(&state.site))
}

pub async fn portfolio(State(state): State<AppState>) -> Html<String> {
    Html(pages::portfolio(&state.site))
}

pub async fn project(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match pages::project_page(&state.site, &slug) {
        Some(html) => Html(html).into_response(),
        None => not_found(State(state)).await,
    }
}

pub async fn testimonials(State(state): State<AppState>) -> Html<String> {
    Html(pages::testimonials(&state.site))
}

pub async fn contact(State(state): State<AppState>) -> Html<String> {
    Html(pages::contact(&state.site))
}

pub async fn blog_index(State(state): State<AppState>) -> Html<String> {
    let posts = state.store.published().await;
    Html(blog::index(&state.site, &posts))
}

pub async fn blog_post(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.store.get_by_slug(&slug).await {
        Some(record) if record.published => Html(blog::post(&state.site, &record)).into_response(),
        _ => not_found(State(state)).await,
    }
}

pub async fn sitemap(State(state): State<AppState>) -> Response {
    let posts = state.store.published().await;
    (
        [(header::CONTENT_TYPE, "application/xml")],
        sitemap::build(&state.site.base_url, &posts),
    )
        .into_response()
}

pub async fn not_found(State(state): State<AppState>) -> Response {
    (StatusCode::NOT_FOUND, Html(pages::not_found(&state.site))).into_response()
}
