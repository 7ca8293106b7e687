//! In-process stand-in for the Search Console API.
//!
//! Serves canned JSON on the same paths as the real API and records every
//! request it receives so tests can assert on request bodies.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::auth::StaticToken;
use crate::client::SearchConsoleClient;

pub const TEST_TOKEN: &str = "test-token";

type SearchHandler = Arc<dyn Fn(&str, &Value) -> Value + Send + Sync>;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub site: Option<String>,
    pub body: Value,
    pub authorization: Option<String>,
}

#[derive(Clone)]
struct MockState {
    sites: Value,
    search: SearchHandler,
    sitemaps: Value,
    inspections: HashMap<String, (StatusCode, Value)>,
    token: (StatusCode, Value),
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockState {
    fn record(&self, path: &str, site: Option<String>, body: Value, headers: &HeaderMap) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(RecordedRequest {
            path: path.to_string(),
            site,
            body,
            authorization,
        });
    }
}

pub struct MockVendorBuilder {
    state: MockState,
}

impl MockVendorBuilder {
    pub fn sites(mut self, body: Value) -> Self {
        self.state.sites = body;
        self
    }

    /// Answer every search analytics query with the same body.
    pub fn search_response(self, body: Value) -> Self {
        self.search(move |_, _| body.clone())
    }

    /// Answer search analytics queries based on site and request body.
    pub fn search<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
    {
        self.state.search = Arc::new(handler);
        self
    }

    pub fn sitemaps(mut self, body: Value) -> Self {
        self.state.sitemaps = body;
        self
    }

    pub fn inspection(mut self, url: &str, body: Value) -> Self {
        self.state
            .inspections
            .insert(url.to_string(), (StatusCode::OK, body));
        self
    }

    pub fn inspection_error(mut self, url: &str, status: StatusCode, message: &str) -> Self {
        self.state.inspections.insert(
            url.to_string(),
            (
                status,
                json!({"error": {"code": status.as_u16(), "message": message}}),
            ),
        );
        self
    }

    pub fn token(mut self, status: StatusCode, body: Value) -> Self {
        self.state.token = (status, body);
        self
    }

    pub async fn spawn(self) -> MockVendor {
        let requests = Arc::clone(&self.state.requests);
        let app = Router::new()
            .route("/webmasters/v3/sites", get(list_sites))
            .route(
                "/webmasters/v3/sites/{site}/searchAnalytics/query",
                post(search_analytics),
            )
            .route("/webmasters/v3/sites/{site}/sitemaps", get(list_sitemaps))
            .route("/v1/urlInspection/index:inspect", post(inspect))
            .route("/token", post(token))
            .with_state(self.state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MockVendor {
            url,
            requests,
            _handle: handle,
        }
    }
}

pub struct MockVendor {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockVendor {
    pub fn builder() -> MockVendorBuilder {
        MockVendorBuilder {
            state: MockState {
                sites: json!({}),
                search: Arc::new(|_, _| json!({})),
                sitemaps: json!({}),
                inspections: HashMap::new(),
                token: (
                    StatusCode::OK,
                    json!({"access_token": "exchanged-token", "expires_in": 3599, "token_type": "Bearer"}),
                ),
                requests: Arc::new(Mutex::new(Vec::new())),
            },
        }
    }

    pub fn client(&self) -> SearchConsoleClient<StaticToken> {
        init_crypto();
        SearchConsoleClient::new(
            self.url.clone(),
            reqwest::Client::new(),
            StaticToken::new(TEST_TOKEN),
        )
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Bodies of the search analytics queries received so far, in order.
    pub fn search_bodies(&self) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == "searchAnalytics")
            .map(|r| r.body)
            .collect()
    }
}

// Initialize crypto provider once for all tests
pub fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// One analytics row in the API's wire shape.
pub fn api_row(keys: &[&str], clicks: f64, impressions: f64, ctr: f64, position: f64) -> Value {
    json!({
        "keys": keys,
        "clicks": clicks,
        "impressions": impressions,
        "ctr": ctr,
        "position": position,
    })
}

async fn list_sites(State(state): State<MockState>, headers: HeaderMap) -> Json<Value> {
    state.record("sites", None, Value::Null, &headers);
    Json(state.sites.clone())
}

async fn search_analytics(
    State(state): State<MockState>,
    Path(site): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.record("searchAnalytics", Some(site.clone()), body.clone(), &headers);
    Json((state.search)(&site, &body))
}

async fn list_sitemaps(
    State(state): State<MockState>,
    Path(site): Path<String>,
    headers: HeaderMap,
) -> Json<Value> {
    state.record("sitemaps", Some(site), Value::Null, &headers);
    Json(state.sitemaps.clone())
}

async fn inspect(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let site = body["siteUrl"].as_str().map(str::to_string);
    state.record("inspect", site, body.clone(), &headers);

    let url = body["inspectionUrl"].as_str().unwrap_or_default();
    match state.inspections.get(url) {
        Some((status, body)) => (*status, Json(body.clone())).into_response(),
        None => Json(json!({})).into_response(),
    }
}

async fn token(State(state): State<MockState>, headers: HeaderMap, body: String) -> Response {
    state.record("token", None, Value::String(body), &headers);
    let (status, body) = state.token.clone();
    (status, Json(body)).into_response()
}
