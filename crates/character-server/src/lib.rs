//! HTTP front for the characters app
//!
//! Every GET is a navigation: the request path is resolved through the
//! mounted app's router and the full page is rendered for it.
//!
//! - redirect followed (web history) → `302` to the final path
//! - not-found view → `404` with the not-found page
//! - `Accept` preferring `application/json` → the resolution as JSON

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use character_app::character_router::HistoryMode;
use character_app::{MountedApp, Page, View};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    app: Arc<MountedApp>,
}

impl AppState {
    pub fn new(app: MountedApp) -> Self {
        Self { app: Arc::new(app) }
    }
}

/// JSON body for `Accept: application/json`
#[derive(Debug, Serialize)]
struct ResolutionBody<'a> {
    view: View,
    params: &'a HashMap<String, String>,
    path: &'a str,
    redirected_from: &'a [String],
}

/// Builds the axum router serving the app
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page_handler))
        .route("/*path", get(page_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn page_handler(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let url = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    match state.app.render_url(url) {
        Ok(page) => respond(&state, page, accepts_json(&headers)),
        Err(err) => {
            error!(url, error = %err, "failed to resolve request");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

fn respond(state: &AppState, page: Page, json: bool) -> Response {
    let status = if page.resolution.view.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };

    if json {
        let body = ResolutionBody {
            view: page.resolution.view,
            params: &page.resolution.params,
            path: &page.resolution.path,
            redirected_from: &page.resolution.redirected_from,
        };
        return (status, Json(body)).into_response();
    }

    let routing = state.app.routing();
    if page.resolution.was_redirected() && matches!(routing.mode(), HistoryMode::Web { .. }) {
        let target = routing.href(&page.location.full_path());
        debug!(from = ?page.resolution.redirected_from, to = %target, "redirecting");
        return (StatusCode::FOUND, [(header::LOCATION, target)]).into_response();
    }

    (status, Html(page.html)).into_response()
}

fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(prefers_json)
        .unwrap_or(false)
}

/// Whether `application/json` is the preferred media type of an `Accept`
/// value: the highest `q`, first listed on ties. Zero weight never wins.
fn prefers_json(accept: &str) -> bool {
    let mut best: Option<(&str, f32)> = None;
    for entry in accept.split(',') {
        let mut parts = entry.split(';').map(str::trim);
        let media = parts.next().unwrap_or_default();
        let weight = parts
            .find_map(|param| param.strip_prefix("q="))
            .and_then(|q| q.parse::<f32>().ok())
            .unwrap_or(1.0);
        if media.is_empty() || weight <= 0.0 {
            continue;
        }
        if best.map_or(true, |(_, top)| weight > top) {
            best = Some((media, weight));
        }
    }
    matches!(best, Some((media, _)) if media.eq_ignore_ascii_case("application/json"))
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let markup = maud::html! {
        (maud::DOCTYPE)
        html lang="en" {
            head { title { (status.to_string()) } }
            body {
                h1 { (status.to_string()) }
                p { (message) }
            }
        }
    };
    (status, Html(markup.into_string())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_json() {
        assert!(prefers_json("application/json"));
        assert!(prefers_json("application/json, text/html"));
        assert!(prefers_json("text/html;q=0.5, application/json"));
        assert!(prefers_json("text/html; q=0.2, application/json; q=0.9"));

        assert!(!prefers_json("text/html, application/json;q=0.1"));
        assert!(!prefers_json("text/html, application/json"));
        assert!(!prefers_json("application/json;q=0, text/html;q=0.1"));
        assert!(!prefers_json("*/*"));
        assert!(!prefers_json(""));
    }
}
