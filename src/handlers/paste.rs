use crate::{error::AppError, models::paste::*, pages, AppState};
use axum::{
    extract::{Host, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// POST /api/paste
pub async fn create_paste(
    State(state): State<AppState>,
    Host(host): Host,
    Json(req): Json<CreatePasteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let paste = state.lifecycle.create(req)?;

    let base = state
        .config
        .public_url
        .clone()
        .unwrap_or_else(|| format!("http://{}", host));

    let response = CreatePasteResponse {
        success: true,
        url: format!("{}/{}", base, paste.id),
        id: paste.id,
        created_at: paste.created_at,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// OPTIONS /api/paste — CORS preflight.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            (header::ACCESS_CONTROL_MAX_AGE, "86400"),
        ],
    )
}

/// GET /:id — HTML paste view. Counts the view.
pub async fn view_paste(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.lifecycle.fetch(&id) {
        Ok(paste) => pages::paste_page(&paste),
        Err(err) => pages::error_page(err),
    }
}

/// GET /:id/raw — verbatim content as plain text. Does not count the view.
pub async fn raw_paste(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.lifecycle.fetch_raw(&id) {
        Ok(paste) => (
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::CACHE_CONTROL, "public, max-age=3600"),
            ],
            paste.content,
        )
            .into_response(),
        Err(err) => {
            let status = err.status();
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!("Internal error on raw route: {:?}", err);
            }
            (status, err.public_message()).into_response()
        }
    }
}
