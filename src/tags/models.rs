//! Persisted tag and enriched-track records.
//!
//! Both serialize as positional JSON arrays:
//!
//! ```text
//! Tag:           [score, "name"]
//! EnrichedTrack: ["track", "artist", "image url", playcount, [Tag, ...]]
//! ```

use serde::{Deserialize, Serialize};

/// A canonical tag: trimmed, lower-cased name with its reported score.
///
/// Identity is the whole pair, so the same name may appear twice with
/// different scores.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u32, String)", into = "(u32, String)")]
pub struct Tag {
    pub score: u32,
    pub name: String,
}

impl From<(u32, String)> for Tag {
    fn from((score, name): (u32, String)) -> Self {
        Self { score, name }
    }
}

impl From<Tag> for (u32, String) {
    fn from(tag: Tag) -> Self {
        (tag.score, tag.name)
    }
}

type EnrichedTrackRow = (String, String, String, u64, Vec<Tag>);

/// A track with its play count and normalized tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EnrichedTrackRow", into = "EnrichedTrackRow")]
pub struct EnrichedTrack {
    pub name: String,
    pub artist: String,
    pub image_url: String,
    pub playcount: u64,
    pub tags: Vec<Tag>,
}

impl From<EnrichedTrackRow> for EnrichedTrack {
    fn from((name, artist, image_url, playcount, tags): EnrichedTrackRow) -> Self {
        Self {
            name,
            artist,
            image_url,
            playcount,
            tags,
        }
    }
}

impl From<EnrichedTrack> for EnrichedTrackRow {
    fn from(track: EnrichedTrack) -> Self {
        (
            track.name,
            track.artist,
            track.image_url,
            track.playcount,
            track.tags,
        )
    }
}
