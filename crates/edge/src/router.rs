// crates/edge/src/router.rs

//! JSON HTTP surface. The only place a locale is read from a request: the
//! `{lang}` path segment is parsed once here and passed down explicitly.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use domain::Locale;
use serde::Serialize;
use serde_json::json;
use serve::service::ContentService;
use tracing::{debug, error};

use crate::view::{self, Kind};
use crate::Error;

#[derive(Debug, Serialize)]
struct CountBody {
    count: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Router construction
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip_all)]
pub fn build(service: Arc<ContentService>) -> Router {
    Router::new()
        .route("/api/blog/count", get(blog_count))
        .route("/api/{lang}/{kind}", get(view_handler))
        .route("/api/{lang}/{kind}/{slug}", get(view_by_slug_handler))
        .fallback(not_found)
        .with_state(service)
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip_all)]
async fn blog_count(State(service): State<Arc<ContentService>>) -> Result<Json<CountBody>, Error> {
    let count = service.blog_count().await?;
    Ok(Json(CountBody { count }))
}

#[tracing::instrument(skip_all)]
async fn view_handler(
    State(service): State<Arc<ContentService>>,
    Path((lang, kind)): Path<(String, String)>,
) -> Result<Response, Error> {
    respond(&service, &lang, &kind, None).await
}

#[tracing::instrument(skip_all)]
async fn view_by_slug_handler(
    State(service): State<Arc<ContentService>>,
    Path((lang, kind, slug)): Path<(String, String, String)>,
) -> Result<Response, Error> {
    respond(&service, &lang, &kind, Some(&slug)).await
}

async fn respond(
    service: &ContentService,
    lang: &str,
    kind: &str,
    slug: Option<&str>,
) -> Result<Response, Error> {
    debug!(lang, kind, slug, "view request");
    let locale = Locale::from_segment(lang);
    let kind = Kind::parse(kind)?;
    match view::resolve(service, kind, locale, slug).await? {
        Some(body) => Ok(Json(body).into_response()),
        None => Ok(not_found().await),
    }
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.to_status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            debug!(error = %self, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapt::{CdnImageBuilder, InMemoryContentStore};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use domain::query::Query;
    use domain::setting::{ContentSettings, ImageSettings};
    use serde_json::Value;
    use serve::source::ContentSource;
    use std::time::Duration;
    use tower::ServiceExt; // oneshot

    fn content_settings() -> ContentSettings {
        ContentSettings {
            project_id: "3rcj5swa".into(),
            dataset: "production".into(),
            api_version: "2025-01-01".into(),
            use_cdn: true,
            token: None,
        }
    }

    fn app_over(source: Arc<dyn ContentSource>) -> Router {
        let images = Arc::new(CdnImageBuilder::new(
            &content_settings(),
            &ImageSettings::default(),
        ));
        let service = ContentService::new(source, images, Duration::from_secs(3600));
        build(Arc::new(service))
    }

    fn app() -> Router {
        let store = InMemoryContentStore::new(vec![
            serde_json::json!({
                "_id": "faq", "_type": "faqSection",
                "headingPl": "Pytania", "headingEn": "Questions",
                "items": [ { "questionPl": "Ile?", "questionEn": "How much?", "answerPl": "Zależy." } ]
            }),
            serde_json::json!({ "_id": "a", "_type": "blogPost", "publishedAt": "2024-01-01T00:00:00Z",
                    "titlePl": "Wpis", "slug": { "current": "wpis" } }),
            serde_json::json!({ "_id": "b", "_type": "blogPost", "publishedAt": "2999-01-01T00:00:00Z",
                    "titlePl": "Jutro", "slug": { "current": "jutro" } }),
        ]);
        app_over(Arc::new(store))
    }

    async fn get(app: Router, path: &str) -> (StatusCode, Value) {
        let req = Request::get(path).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    // ─────────────────────────────────────────────────────────────
    // views
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn blog_count_is_locale_free() {
        let (status, body) = get(app(), "/api/blog/count").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "count": 1 }));
    }

    #[tokio::test]
    async fn lang_segment_selects_locale() {
        let (status, body) = get(app(), "/api/en/faq").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["heading"], "Questions");
        assert_eq!(body["items"][0]["question"], "How much?");
        assert_eq!(body["items"][0]["answer"], "Zależy.");
    }

    #[tokio::test]
    async fn unrecognised_lang_falls_back_to_default() {
        let (_, body) = get(app(), "/api/de/faq").await;
        assert_eq!(body["heading"], "Pytania");
    }

    #[tokio::test]
    async fn detail_by_slug() {
        let (status, body) = get(app(), "/api/pl/blog-post/wpis").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Wpis");

        let (status, _) = get(app(), "/api/pl/blog-post/jutro").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ─────────────────────────────────────────────────────────────
    // errors
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn absent_record_is_not_found() {
        let (status, _) = get(app(), "/api/pl/contact").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_kind_is_not_found() {
        let (status, body) = get(app(), "/api/pl/pages").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("pages"));
    }

    #[tokio::test]
    async fn slug_rules() {
        let (status, _) = get(app(), "/api/pl/project").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = get(app(), "/api/pl/faq/extra").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    struct Down;

    #[async_trait]
    impl ContentSource for Down {
        async fn fetch(&self, _: &Query) -> serve::Result<Value> {
            Err(serve::Error::source("connection refused"))
        }
    }

    #[tokio::test]
    async fn transport_failure_is_bad_gateway() {
        let (status, body) = get(app_over(Arc::new(Down)), "/api/pl/services").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("connection refused"));
    }
}
