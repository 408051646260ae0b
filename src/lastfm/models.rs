//! Models for the Last.fm API responses.
//!
//! The wire types mirror the JSON envelopes returned by `user.gettoptracks`
//! and `track.gettoptags`. Numeric fields arrive as strings on some endpoints
//! and as numbers on others, so they go through [`number_or_string`].

use clap::ValueEnum;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::RemoteError;

pub(crate) const TOP_TRACKS_ENDPOINT: &str = "user.gettoptracks";
pub(crate) const TOP_TAGS_ENDPOINT: &str = "track.gettoptags";

// =============================================================================
// Time windows
// =============================================================================

/// Reporting period over which the service ranks a user's top tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, ValueEnum)]
pub enum TimeWindow {
    #[serde(rename = "overall")]
    #[value(name = "overall")]
    Overall,
    #[serde(rename = "7day")]
    #[value(name = "7day")]
    SevenDay,
    #[serde(rename = "1month")]
    #[value(name = "1month")]
    OneMonth,
    #[serde(rename = "3month")]
    #[value(name = "3month")]
    ThreeMonth,
    #[serde(rename = "6month")]
    #[value(name = "6month")]
    SixMonth,
    #[serde(rename = "12month")]
    #[value(name = "12month")]
    TwelveMonth,
}

impl TimeWindow {
    /// Value of the `period` query parameter.
    pub fn as_period(&self) -> &'static str {
        match self {
            TimeWindow::Overall => "overall",
            TimeWindow::SevenDay => "7day",
            TimeWindow::OneMonth => "1month",
            TimeWindow::ThreeMonth => "3month",
            TimeWindow::SixMonth => "6month",
            TimeWindow::TwelveMonth => "12month",
        }
    }

    /// Prefix used for every artifact written for this window.
    pub fn artifact_prefix(&self) -> &'static str {
        self.as_period()
    }
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_period())
    }
}

// =============================================================================
// Normalized results
// =============================================================================

/// A ranked track as listed by the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawTrackEntry {
    pub name: String,
    pub artist: String,
    /// Image URLs, smallest first.
    pub images: Vec<String>,
    pub playcount: u64,
}

impl RawTrackEntry {
    /// The highest-resolution image, which the service lists last.
    pub fn best_image_url(&self) -> &str {
        self.images.last().map(String::as_str).unwrap_or_default()
    }
}

/// One page of a top-tracks listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageResult {
    pub tracks: Vec<RawTrackEntry>,
    pub page: u32,
    pub total_pages: u32,
}

/// A tag as reported by the service, before any filtering.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RawTag {
    #[serde(deserialize_with = "number_or_string")]
    pub count: u32,
    pub name: String,
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + FromStr,
    <T as FromStr>::Err: Display,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => {
            T::try_from(n).map_err(|_| de::Error::custom(format!("number {} out of range", n)))
        }
        NumberOrString::String(s) => s.trim().parse::<T>().map_err(de::Error::custom),
    }
}

/// The service collapses single-element arrays into a bare object.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Deserialize)]
struct TopTracksResponse {
    toptracks: Option<TopTracksContainer>,
    error: Option<i64>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct TopTracksContainer {
    #[serde(default)]
    track: Option<OneOrMany<WireTrack>>,
    #[serde(rename = "@attr")]
    attr: Option<PageAttr>,
}

#[derive(Deserialize)]
struct PageAttr {
    #[serde(deserialize_with = "number_or_string")]
    page: u32,
    #[serde(rename = "totalPages", deserialize_with = "number_or_string")]
    total_pages: u32,
}

#[derive(Deserialize)]
struct WireTrack {
    name: String,
    artist: WireArtist,
    #[serde(default)]
    image: Vec<WireImage>,
    #[serde(deserialize_with = "number_or_string")]
    playcount: u64,
}

#[derive(Deserialize)]
struct WireArtist {
    name: String,
}

#[derive(Deserialize)]
struct WireImage {
    #[serde(rename = "#text", default)]
    url: String,
}

#[derive(Deserialize)]
struct TopTagsResponse {
    toptags: Option<TopTagsContainer>,
    error: Option<i64>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct TopTagsContainer {
    #[serde(default)]
    tag: Option<OneOrMany<RawTag>>,
}

impl From<WireTrack> for RawTrackEntry {
    fn from(track: WireTrack) -> Self {
        Self {
            name: track.name,
            artist: track.artist.name,
            images: track.image.into_iter().map(|i| i.url).collect(),
            playcount: track.playcount,
        }
    }
}

/// Parse a `user.gettoptracks` response body.
pub fn parse_track_page(body: &[u8]) -> Result<PageResult, RemoteError> {
    let response: TopTracksResponse =
        serde_json::from_slice(body).map_err(|source| RemoteError::Decode {
            endpoint: TOP_TRACKS_ENDPOINT,
            source,
        })?;

    let Some(container) = response.toptracks else {
        if let Some(code) = response.error {
            return Err(RemoteError::Api {
                endpoint: TOP_TRACKS_ENDPOINT,
                code,
                message: response.message.unwrap_or_default(),
            });
        }
        return Err(RemoteError::MissingField {
            endpoint: TOP_TRACKS_ENDPOINT,
            field: "toptracks",
        });
    };

    let attr = container.attr.ok_or(RemoteError::MissingField {
        endpoint: TOP_TRACKS_ENDPOINT,
        field: "toptracks.@attr",
    })?;

    let tracks = container
        .track
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .map(RawTrackEntry::from)
        .collect();

    Ok(PageResult {
        tracks,
        page: attr.page,
        total_pages: attr.total_pages,
    })
}

/// Parse a `track.gettoptags` response body.
///
/// A missing `toptags` object means the service has no tag data for the
/// track, which is a normal outcome.
pub fn parse_track_tags(body: &[u8]) -> Result<Vec<RawTag>, RemoteError> {
    let response: TopTagsResponse =
        serde_json::from_slice(body).map_err(|source| RemoteError::Decode {
            endpoint: TOP_TAGS_ENDPOINT,
            source,
        })?;

    match response.toptags {
        Some(container) => Ok(container.tag.map(OneOrMany::into_vec).unwrap_or_default()),
        None => {
            if let Some(code) = response.error {
                tracing::debug!(
                    "No tag data (error {}): {}",
                    code,
                    response.message.unwrap_or_default()
                );
            }
            Ok(vec![])
        }
    }
}
