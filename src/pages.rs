//! Server-rendered pages and static assets.
//!
//! Rendering is pure: each handler builds an immutable view struct and feeds
//! it to an Askama template. Paste content is escaped by the template engine;
//! the stored value itself is never touched.

use crate::{error::AppError, models::paste::Paste};
use askama::Template;
use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{TimeZone, Utc};
use serde_json::json;

const PAGE_CACHE: &str = "public, max-age=3600";
const ASSET_CACHE: &str = "public, max-age=86400";

const FAVICON_SVG: &str = r##"<svg width="32" height="32" viewBox="0 0 32 32" xmlns="http://www.w3.org/2000/svg">
  <rect width="32" height="32" fill="#000000"/>
  <rect x="8" y="10" width="16" height="18" rx="2" fill="#fbbf24"/>
  <rect x="12" y="6" width="8" height="6" rx="1" fill="#ffffff"/>
  <rect x="14" y="8" width="4" height="2" rx="0.5" fill="#000000"/>
  <rect x="11" y="14" width="10" height="1.5" fill="#000000"/>
  <rect x="11" y="17" width="8" height="1.5" fill="#000000"/>
  <rect x="11" y="20" width="10" height="1.5" fill="#000000"/>
  <rect x="11" y="23" width="6" height="1.5" fill="#000000"/>
</svg>"##;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

#[derive(Template)]
#[template(path = "paste.html")]
struct PasteTemplate {
    id: String,
    title: String,
    language: String,
    created: String,
    expires: String,
    views: u64,
    content: String,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    heading: String,
    message: String,
}

fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(tmpl
        .render()
        .unwrap_or_else(|e| format!("<pre>Template error: {e}</pre>")))
}

fn format_ms(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Rendered paste view page (view counter already incremented upstream).
pub fn paste_page(paste: &Paste) -> Response {
    let tmpl = PasteTemplate {
        id: paste.id.clone(),
        title: paste.title.clone(),
        language: paste.language.clone().unwrap_or_default(),
        created: format_ms(paste.created_at),
        expires: paste
            .expires_at
            .map(format_ms)
            .unwrap_or_else(|| "Never".to_string()),
        views: paste.views,
        content: paste.content.clone(),
    };
    ([(header::CACHE_CONTROL, PAGE_CACHE)], render(tmpl)).into_response()
}

/// HTML error page for the view route.
pub fn error_page(err: AppError) -> Response {
    let status = err.status();
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Internal error on view route: {:?}", err);
    }
    let (heading, message) = match status {
        StatusCode::NOT_FOUND => (
            "Paste Not Found",
            "The paste you're looking for doesn't exist or may have expired.",
        ),
        StatusCode::GONE => (
            "Paste Expired",
            "This paste has reached its expiration time and is no longer available.",
        ),
        _ => (
            "Server Error",
            "Something went wrong on our end. Please try again later.",
        ),
    };
    let tmpl = ErrorTemplate {
        heading: heading.to_string(),
        message: message.to_string(),
    };
    (status, render(tmpl)).into_response()
}

pub async fn index() -> impl IntoResponse {
    ([(header::CACHE_CONTROL, PAGE_CACHE)], render(IndexTemplate))
}

pub async fn robots() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/plain"),
            (header::CACHE_CONTROL, ASSET_CACHE),
        ],
        "User-agent: *\nAllow: /\n",
    )
}

pub async fn favicon() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=31536000"),
        ],
        FAVICON_SVG,
    )
}

pub async fn manifest() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, ASSET_CACHE)],
        Json(json!({
            "name": "QuickPaste",
            "short_name": "QuickPaste",
            "description": "Fast, secure & anonymous pastebin",
            "start_url": "/",
            "display": "standalone",
            "background_color": "#000000",
            "theme_color": "#fbbf24",
            "icons": [
                { "src": "/favicon.svg", "sizes": "any", "type": "image/svg+xml" }
            ]
        })),
    )
}
