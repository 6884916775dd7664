// crates/adapt/src/http.rs

//! HTTP client for the hosted content store's query endpoint.

use async_trait::async_trait;
use domain::query::Query;
use domain::setting::ContentSettings;
use serde::Deserialize;
use serde_json::Value as Json;
use tracing::{debug, error};

use serve::source::ContentSource;

use crate::{groq, Error};

/// Stateless apart from its configuration; one instance serves every query.
#[derive(Debug, Clone)]
pub struct SanityClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl SanityClient {
    pub fn new(settings: &ContentSettings) -> Self {
        Self::with_client(settings, reqwest::Client::new())
    }

    pub fn with_client(settings: &ContentSettings, http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: endpoint(settings),
            token: settings.token.clone().filter(|t| !t.is_empty()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The request for `query`: the rendered query plus one `$name`
    /// parameter per binding, each JSON-encoded.
    pub fn request(&self, query: &Query) -> Result<reqwest::RequestBuilder, Error> {
        let mut pairs = vec![("query".to_owned(), groq::render(query))];
        for (name, value) in &query.params {
            pairs.push((format!("${name}"), serde_json::to_string(value)?));
        }

        let mut req = self.http.get(&self.endpoint).query(&pairs);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        Ok(req)
    }

    pub async fn execute(&self, query: &Query) -> Result<Json, Error> {
        let req = self.request(query)?;
        debug!(endpoint = %self.endpoint, groq = %groq::render(query), "content query");

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        decode(status, &body)
    }
}

#[async_trait]
impl ContentSource for SanityClient {
    async fn fetch(&self, query: &Query) -> serve::Result<Json> {
        self.execute(query).await.map_err(|err| {
            error!(error = %err, "content query failed");
            err.into()
        })
    }
}

fn endpoint(settings: &ContentSettings) -> String {
    let host = if settings.use_cdn { "apicdn" } else { "api" };
    let version = settings.api_version.trim_start_matches('v');
    format!(
        "https://{}.{host}.sanity.io/v{version}/data/query/{}",
        settings.project_id, settings.dataset
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Response envelope
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    description: Option<String>,
}

/// Unwrap `{ "result": ... }`, or turn a non-2xx answer into
/// [`Error::Status`] carrying the store's own message when it sent one.
fn decode(status: u16, body: &str) -> Result<Json, Error> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|e| e.error.and_then(|b| b.description).or(e.message))
            .unwrap_or_else(|| body.to_owned());
        return Err(Error::Status { status, message });
    }

    let mut envelope: serde_json::Map<String, Json> = serde_json::from_str(body)?;
    envelope.remove("result").ok_or(Error::MissingResult)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(use_cdn: bool, token: Option<&str>) -> ContentSettings {
        ContentSettings {
            project_id: "3rcj5swa".into(),
            dataset: "production".into(),
            api_version: "2025-01-01".into(),
            use_cdn,
            token: token.map(str::to_owned),
        }
    }

    fn pairs(req: &reqwest::Request) -> Vec<(String, String)> {
        req.url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────
    // endpoint and request
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn cdn_and_live_hosts() {
        assert_eq!(
            SanityClient::new(&settings(true, None)).endpoint(),
            "https://3rcj5swa.apicdn.sanity.io/v2025-01-01/data/query/production"
        );
        assert_eq!(
            SanityClient::new(&settings(false, None)).endpoint(),
            "https://3rcj5swa.api.sanity.io/v2025-01-01/data/query/production"
        );
    }

    #[test]
    fn version_prefix_is_not_doubled() {
        let mut s = settings(true, None);
        s.api_version = "v2025-01-01".into();
        assert!(SanityClient::new(&s).endpoint().contains("/v2025-01-01/"));
    }

    #[test]
    fn parameters_are_json_encoded() {
        let client = SanityClient::new(&settings(true, None));
        let q = Query::of_type("project").slug("wind-farm").first();
        let req = client.request(&q).unwrap().build().unwrap();

        let pairs = pairs(&req);
        assert_eq!(pairs[0].0, "query");
        assert_eq!(pairs[0].1, groq::render(&q));
        assert_eq!(pairs[1], ("$slug".to_owned(), "\"wind-farm\"".to_owned()));
        assert!(req.headers().get("authorization").is_none());
    }

    #[test]
    fn token_is_sent_as_bearer() {
        let client = SanityClient::new(&settings(false, Some("sk-read")));
        let req = client
            .request(&Query::of_type("faqSection"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            req.headers().get("authorization").unwrap(),
            "Bearer sk-read"
        );
    }

    #[test]
    fn empty_token_is_ignored() {
        let client = SanityClient::new(&settings(false, Some("")));
        let req = client
            .request(&Query::of_type("faqSection"))
            .unwrap()
            .build()
            .unwrap();
        assert!(req.headers().get("authorization").is_none());
    }

    // ─────────────────────────────────────────────────────────────
    // decode
    // ─────────────────────────────────────────────────────────────

    #[test]
    fn result_is_unwrapped() {
        let v = decode(200, r#"{"ms":3,"query":"*","result":[{"_id":"a"}]}"#).unwrap();
        assert_eq!(v, json!([{ "_id": "a" }]));
    }

    #[test]
    fn null_result_is_no_match() {
        assert_eq!(decode(200, r#"{"result":null}"#).unwrap(), Json::Null);
    }

    #[test]
    fn body_without_result_is_rejected() {
        assert!(matches!(decode(200, r#"{"ms":3}"#), Err(Error::MissingResult)));
    }

    #[test]
    fn store_error_description_is_kept() {
        let body = r#"{"error":{"description":"expected '}' following object body","type":"queryParseError"}}"#;
        match decode(400, body) {
            Err(Error::Status { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "expected '}' following object body");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_error_body_is_passed_through() {
        match decode(502, "Bad Gateway") {
            Err(Error::Status { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_success_body_is_a_json_error() {
        assert!(matches!(decode(200, "<html>"), Err(Error::Json(_))));
    }

    // ─────────────────────────────────────────────────────────────
    // round trip against a local endpoint
    // ─────────────────────────────────────────────────────────────

    use axum::extract::Query as Params;
    use axum::http::{HeaderMap, StatusCode};
    use axum::{routing::get, Router};
    use std::collections::HashMap;

    const PATH: &str = "/v2025-01-01/data/query/production";

    async fn local(router: Router, token: Option<&str>) -> SanityClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });
        SanityClient {
            http: reqwest::Client::new(),
            endpoint: format!("http://{addr}{PATH}"),
            token: token.map(str::to_owned),
        }
    }

    /// Answers with the query string and auth header it received.
    async fn echo(
        headers: HeaderMap,
        Params(params): Params<HashMap<String, String>>,
    ) -> axum::Json<Json> {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        axum::Json(json!({ "ms": 1, "result": { "params": params, "auth": auth } }))
    }

    #[tokio::test]
    async fn query_and_bound_parameters_reach_the_wire() {
        let client = local(Router::new().route(PATH, get(echo)), Some("sk-read")).await;
        let q = Query::of_type("project").slug("wind-farm").first();

        let got = client.execute(&q).await.unwrap();
        assert_eq!(got["params"]["query"], groq::render(&q));
        assert_eq!(got["params"]["$slug"], "\"wind-farm\"");
        assert_eq!(got["auth"], "Bearer sk-read");
    }

    #[tokio::test]
    async fn error_status_carries_store_message() {
        let router = Router::new().route(
            PATH,
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    axum::Json(json!({ "error": { "description": "param $slug referenced, but not provided" } })),
                )
            }),
        );
        let client = local(router, None).await;

        match client.execute(&Query::of_type("faqSection")).await {
            Err(Error::Status { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "param $slug referenced, but not provided");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_surfaces_as_source_failure() {
        let router = Router::new().route(
            PATH,
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream down") }),
        );
        let client = local(router, None).await;

        let err = client.fetch(&Query::of_type("faqSection")).await.unwrap_err();
        assert!(matches!(err, serve::Error::Source(_)));
        assert_eq!(err.to_status().as_u16(), 502);
        assert!(err.to_string().contains("upstream down"));
    }

    #[tokio::test]
    async fn malformed_ok_body_is_a_json_error() {
        let router = Router::new().route(PATH, get(|| async { "<html>maintenance</html>" }));
        let client = local(router, None).await;

        assert!(matches!(
            client.execute(&Query::of_type("faqSection")).await,
            Err(Error::Json(_))
        ));
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = SanityClient {
            http: reqwest::Client::new(),
            endpoint: format!("http://{addr}{PATH}"),
            token: None,
        };

        assert!(matches!(
            client.execute(&Query::of_type("faqSection")).await,
            Err(Error::Http(_))
        ));
    }
}
