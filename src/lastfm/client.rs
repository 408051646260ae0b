//! Last.fm API client for top tracks and track tags.
//!
//! The client does no pacing of its own: callers decide how long to idle
//! between requests (see [`crate::throttle`]).

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::models::{
    parse_track_page, parse_track_tags, PageResult, RawTag, TimeWindow, TOP_TAGS_ENDPOINT,
    TOP_TRACKS_ENDPOINT,
};
use crate::error::RemoteError;

pub const LASTFM_API_BASE: &str = "https://ws.audioscrobbler.com/2.0/";

/// Maximum page size accepted by `user.gettoptracks`.
pub const TOP_TRACKS_PAGE_LIMIT: u32 = 1000;

/// Read access to a user's ranked listening history.
#[async_trait]
pub trait ScrobbleCatalog: Send + Sync {
    /// Fetch one page of the user's top tracks, optionally restricted to a window.
    async fn fetch_track_page(
        &self,
        page: u32,
        window: Option<TimeWindow>,
    ) -> Result<PageResult, RemoteError>;

    /// Fetch the community tags of a track. Empty when the service has none.
    async fn fetch_track_tags(&self, track: &str, artist: &str)
        -> Result<Vec<RawTag>, RemoteError>;
}

pub struct LastFmClient {
    client: Client,
    base_url: String,
    username: String,
    api_key: String,
}

impl LastFmClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. [`LASTFM_API_BASE`]
    /// * `username` - User whose history is collected
    /// * `api_key` - Last.fm API key
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(
        base_url: &str,
        username: &str,
        api_key: &str,
        timeout_sec: u64,
    ) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            username: username.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn top_tracks_url(&self, page: u32, window: Option<TimeWindow>) -> String {
        let mut url = format!(
            "{}?method={}&format=json&user={}&api_key={}&limit={}&page={}",
            self.base_url,
            TOP_TRACKS_ENDPOINT,
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.api_key),
            TOP_TRACKS_PAGE_LIMIT,
            page
        );
        if let Some(window) = window {
            url.push_str("&period=");
            url.push_str(window.as_period());
        }
        url
    }

    fn top_tags_url(&self, track: &str, artist: &str) -> String {
        format!(
            "{}?method={}&format=json&track={}&artist={}&autocorrect=1&api_key={}",
            self.base_url,
            TOP_TAGS_ENDPOINT,
            urlencoding::encode(track),
            urlencoding::encode(artist),
            urlencoding::encode(&self.api_key)
        )
    }

    async fn get(&self, endpoint: &'static str, url: &str) -> Result<Vec<u8>, RemoteError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(RemoteError::Status {
                endpoint,
                status: response.status(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ScrobbleCatalog for LastFmClient {
    async fn fetch_track_page(
        &self,
        page: u32,
        window: Option<TimeWindow>,
    ) -> Result<PageResult, RemoteError> {
        let url = self.top_tracks_url(page, window);
        debug!("Fetching top tracks page {} ({:?})", page, window);
        let body = self.get(TOP_TRACKS_ENDPOINT, &url).await?;
        parse_track_page(&body)
    }

    async fn fetch_track_tags(
        &self,
        track: &str,
        artist: &str,
    ) -> Result<Vec<RawTag>, RemoteError> {
        let url = self.top_tags_url(track, artist);
        debug!("Fetching tags for {} by {}", track, artist);
        let body = self.get(TOP_TAGS_ENDPOINT, &url).await?;
        parse_track_tags(&body)
    }
}
