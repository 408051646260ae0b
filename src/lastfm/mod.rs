//! Last.fm API access.
//!
//! - `client`: HTTP client behind the [`ScrobbleCatalog`] trait
//! - `models`: response parsing and the normalized result types

pub mod client;
pub mod models;

pub use client::{LastFmClient, ScrobbleCatalog, LASTFM_API_BASE, TOP_TRACKS_PAGE_LIMIT};
pub use models::{PageResult, RawTag, RawTrackEntry, TimeWindow};
