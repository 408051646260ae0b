//! Fake Last.fm API server
//!
//! Serves scripted `user.gettoptracks` pages (per period) and
//! `track.gettoptags` responses, and records every query it receives.

use super::constants::*;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use scrobble_tags::LastFmClient;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

type Params = HashMap<String, String>;

#[derive(Default)]
struct FakeState {
    /// period -> pages -> (track, artist, playcount)
    pages: HashMap<String, Vec<Vec<(String, String, u64)>>>,
    /// track name -> (count, tag)
    tags: HashMap<String, Vec<(u32, String)>>,
    failing_tracks: Vec<String>,
    requests: Mutex<Vec<Params>>,
}

pub struct FakeLastFmBuilder {
    state: FakeState,
}

impl FakeLastFmBuilder {
    /// Appends a page to the listing of `period`.
    pub fn page(mut self, period: &str, tracks: &[(&str, &str, u64)]) -> Self {
        let page = tracks
            .iter()
            .map(|(name, artist, playcount)| (name.to_string(), artist.to_string(), *playcount))
            .collect();
        self.state
            .pages
            .entry(period.to_string())
            .or_default()
            .push(page);
        self
    }

    pub fn tags(mut self, track: &str, tags: &[(u32, &str)]) -> Self {
        self.state.tags.insert(
            track.to_string(),
            tags.iter()
                .map(|(count, name)| (*count, name.to_string()))
                .collect(),
        );
        self
    }

    /// Tag requests for this track answer with HTTP 500.
    pub fn failing_track(mut self, track: &str) -> Self {
        self.state.failing_tracks.push(track.to_string());
        self
    }

    pub async fn spawn(self) -> FakeLastFm {
        let state = Arc::new(self.state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let app = Router::new()
            .route("/2.0/", get(handle))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        FakeLastFm {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
            _shutdown_tx: Some(shutdown_tx),
        }
    }
}

/// Fake Last.fm instance. Shuts down when dropped.
pub struct FakeLastFm {
    pub base_url: String,
    state: Arc<FakeState>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl FakeLastFm {
    pub fn builder() -> FakeLastFmBuilder {
        FakeLastFmBuilder {
            state: FakeState::default(),
        }
    }

    pub fn api_url(&self) -> String {
        format!("{}/2.0/", self.base_url)
    }

    /// A client authenticated with the expected test credentials.
    pub fn client(&self) -> LastFmClient {
        self.client_with_key(TEST_API_KEY)
    }

    pub fn client_with_key(&self, api_key: &str) -> LastFmClient {
        LastFmClient::new(&self.api_url(), TEST_USERNAME, api_key, 5)
            .expect("Failed to create Last.fm client")
    }

    /// Every query received for `method`, in arrival order.
    pub fn requests_for(&self, method: &str) -> Vec<Params> {
        self.state
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.get("method").map(String::as_str) == Some(method))
            .cloned()
            .collect()
    }
}

async fn handle(State(state): State<Arc<FakeState>>, Query(params): Query<Params>) -> Response {
    state.requests.lock().unwrap().push(params.clone());

    if params.get("api_key").map(String::as_str) != Some(TEST_API_KEY) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": 10, "message": "Invalid API key"})),
        )
            .into_response();
    }

    match params.get("method").map(String::as_str) {
        Some("user.gettoptracks") => Json(top_tracks(&state, &params)).into_response(),
        Some("track.gettoptags") => top_tags(&state, &params),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": 3, "message": "Invalid Method"})),
        )
            .into_response(),
    }
}

fn top_tracks(state: &FakeState, params: &Params) -> Value {
    let period = params.get("period").map(String::as_str).unwrap_or("overall");
    let page: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    let pages = state.pages.get(period).cloned().unwrap_or_default();
    let total: usize = pages.iter().map(Vec::len).sum();

    let tracks: Vec<Value> = pages
        .get(page.saturating_sub(1))
        .map(|tracks| {
            tracks
                .iter()
                .map(|(name, artist, playcount)| {
                    json!({
                        "name": name,
                        "playcount": playcount.to_string(),
                        "mbid": "",
                        "artist": {"name": artist, "mbid": ""},
                        "image": [
                            {"#text": format!("https://img.test/{}/small.png", name), "size": "small"},
                            {"#text": format!("https://img.test/{}/extralarge.png", name), "size": "extralarge"}
                        ],
                        "@attr": {"rank": "1"}
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    json!({
        "toptracks": {
            "track": tracks,
            "@attr": {
                "user": TEST_USERNAME,
                "page": page.to_string(),
                "perPage": "1000",
                "totalPages": pages.len().to_string(),
                "total": total.to_string()
            }
        }
    })
}

fn top_tags(state: &FakeState, params: &Params) -> Response {
    let track = params.get("track").cloned().unwrap_or_default();

    if state.failing_tracks.contains(&track) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }

    match state.tags.get(&track) {
        Some(tags) => {
            let tags: Vec<Value> = tags
                .iter()
                .map(|(count, name)| json!({"count": count, "name": name, "url": ""}))
                .collect();
            Json(json!({
                "toptags": {
                    "tag": tags,
                    "@attr": {"track": track}
                }
            }))
            .into_response()
        }
        None => Json(json!({"error": 6, "message": "Track not found"})).into_response(),
    }
}
