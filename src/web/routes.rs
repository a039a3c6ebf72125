use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use url::Url;

use super::pages::{render_gallery_page, GalleryPageParams};
use super::AppState;
use crate::filters::FilterSelection;
use crate::model::Highlight;
use crate::orchestrator::QueryOrchestrator;

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery))
        .route("/api/highlights", get(api_highlights))
        .route("/api/filters", get(api_filters))
        .route("/media", get(media_proxy))
        .route("/healthz", get(health))
        .route("/favicon.ico", get(favicon))
}

// ========== HTML Routes ==========

#[derive(Debug, Deserialize)]
pub struct GalleryParams {
    #[serde(flatten)]
    selection: FilterSelection,
    open: Option<String>,
}

async fn gallery(State(state): State<AppState>, Query(params): Query<GalleryParams>) -> Response {
    let orchestrator = QueryOrchestrator::new(state.store.clone());
    let (options, gallery) = tokio::join!(
        state.filter_options.get(state.store.as_ref()),
        orchestrator.load(params.selection.clone()),
    );

    let html = render_gallery_page(&GalleryPageParams {
        site_title: &state.config.site_title,
        selection: &params.selection,
        options: &options,
        state: &gallery,
        open: params.open.as_deref().filter(|id| !id.is_empty()),
    });
    Html(html.into_string()).into_response()
}

// ========== API Routes ==========

#[derive(Debug, Serialize)]
pub struct ApiHighlightsResponse {
    data: Vec<Highlight>,
    count: usize,
    filters: FilterSelection,
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

async fn api_highlights(
    State(state): State<AppState>,
    Query(selection): Query<FilterSelection>,
) -> Response {
    let gallery = QueryOrchestrator::new(state.store.clone())
        .load(selection.clone())
        .await;

    if let Some(error) = gallery.error {
        return (StatusCode::BAD_GATEWAY, Json(ApiError { error })).into_response();
    }

    Json(ApiHighlightsResponse {
        count: gallery.results.len(),
        data: gallery.results,
        filters: selection,
    })
    .into_response()
}

async fn api_filters(State(state): State<AppState>) -> Response {
    Json(state.filter_options.get(state.store.as_ref()).await).into_response()
}

// ========== Media Proxy ==========

#[derive(Debug, Deserialize)]
pub struct MediaParams {
    url: String,
}

async fn media_proxy(State(state): State<AppState>, Query(params): Query<MediaParams>) -> Response {
    let Ok(url) = Url::parse(&params.url) else {
        return (StatusCode::BAD_REQUEST, "Invalid media URL").into_response();
    };

    if !state.media_allow_list.iter().any(|host| host.permits(&url)) {
        tracing::warn!(url = %url, "Refusing to proxy media from host outside allow-list");
        return (StatusCode::FORBIDDEN, "Media host not allowed").into_response();
    }

    let mut response = match state.media_http.get(url.clone()).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Failed to fetch media");
            return (StatusCode::BAD_GATEWAY, "Failed to fetch media").into_response();
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url = %url, status = %status, "Upstream media request failed");
        return (StatusCode::BAD_GATEWAY, "Failed to fetch media").into_response();
    }

    // Determine proper content type
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream")
        .map_or_else(
            || {
                mime_guess::from_path(url.path())
                    .first_or_octet_stream()
                    .to_string()
            },
            str::to_string,
        );

    if !content_type.starts_with("image/") {
        tracing::warn!(
            url = %url,
            content_type = %content_type,
            "Refusing to proxy non-image media"
        );
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Only images are proxied").into_response();
    }

    let max_bytes = state.config.media_max_bytes;
    if response.content_length().is_some_and(|len| len > max_bytes) {
        tracing::warn!(url = %url, max_bytes, "Upstream media exceeds size limit");
        return (StatusCode::PAYLOAD_TOO_LARGE, "Media too large").into_response();
    }

    // Content-Length can be absent or wrong, so the read itself is bounded too
    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let total = u64::try_from(body.len() + chunk.len()).unwrap_or(u64::MAX);
                if total > max_bytes {
                    tracing::warn!(url = %url, max_bytes, "Upstream media exceeds size limit");
                    return (StatusCode::PAYLOAD_TOO_LARGE, "Media too large").into_response();
                }
                body.extend_from_slice(&chunk);
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Failed to read media body");
                return (StatusCode::BAD_GATEWAY, "Failed to fetch media").into_response();
            }
        }
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "public, max-age=86400".to_string()),
        ],
        body,
    )
        .into_response()
}

// ========== Misc ==========

async fn health() -> &'static str {
    "OK"
}

async fn favicon() -> Response {
    // Return a simple SVG favicon (clapper board emoji)
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><text y=".9em" font-size="90">🎬</text></svg>"#;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/svg+xml")],
        svg,
    )
        .into_response()
}
