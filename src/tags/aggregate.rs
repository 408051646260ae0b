//! Tag score aggregation and ranking.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;

use super::models::EnrichedTrack;

/// Lengths of the name-only slices written next to the full table.
pub const TOP_SLICE_SIZES: [usize; 3] = [10, 50, 250];

/// Summed tag scores for one window, ranked by score.
///
/// Ties keep the order in which names were first encountered while
/// summing, so the ranking is reproducible for the same input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagTable {
    entries: Vec<(String, u64)>,
}

impl TagTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, score)` pairs, highest score first.
    pub fn ranked(&self) -> &[(String, u64)] {
        &self.entries
    }

    /// The first `n` tag names. Shorter tables return every name.
    pub fn top_names(&self, n: usize) -> Vec<String> {
        self.entries
            .iter()
            .take(n)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl Serialize for TagTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, score) in &self.entries {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}

/// Sum tag scores by name over every track and rank the result.
pub fn aggregate(tracks: &[EnrichedTrack]) -> TagTable {
    let mut entries: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tag in tracks.iter().flat_map(|track| &track.tags) {
        match index.get(tag.name.as_str()) {
            Some(&i) => entries[i].1 += u64::from(tag.score),
            None => {
                index.insert(&tag.name, entries.len());
                entries.push((tag.name.clone(), u64::from(tag.score)));
            }
        }
    }

    // Stable sort keeps first-seen order among equal scores.
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    TagTable { entries }
}
