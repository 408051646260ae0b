//! Noise filter for crowd-sourced tags.
//!
//! Filters are applied in a fixed order; the final dedup step depends on it.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use super::models::Tag;
use crate::lastfm::RawTag;

/// Tags reported this many times or fewer are discarded.
pub const MIN_TAG_COUNT: u32 = 3;
/// Shortest accepted tag name, in characters.
pub const MIN_TAG_NAME_LEN: usize = 3;
/// Names must be strictly shorter than this, in characters.
pub const MAX_TAG_NAME_LEN: usize = 15;

lazy_static! {
    static ref TAG_NAME_PATTERN: Regex = Regex::new(r"^[a-zA-Z\- ]+$").unwrap();
}

fn has_accepted_length(name: &str) -> bool {
    let len = name.trim().chars().count();
    (MIN_TAG_NAME_LEN..MAX_TAG_NAME_LEN).contains(&len)
}

/// Filter, sort and canonicalize raw tags.
///
/// 1. count > [`MIN_TAG_COUNT`]
/// 2. trimmed name length in `[MIN_TAG_NAME_LEN, MAX_TAG_NAME_LEN)`
/// 3. name made only of ASCII letters, hyphens and spaces
/// 4. stable sort by count, descending
/// 5. trim + lowercase, then drop repeated `(count, name)` pairs
pub fn normalize(raw_tags: &[RawTag]) -> Vec<Tag> {
    let mut kept: Vec<&RawTag> = raw_tags
        .iter()
        .filter(|tag| tag.count > MIN_TAG_COUNT)
        .filter(|tag| has_accepted_length(&tag.name))
        .filter(|tag| TAG_NAME_PATTERN.is_match(&tag.name))
        .collect();

    kept.sort_by(|a, b| b.count.cmp(&a.count));

    let mut seen = HashSet::new();
    kept.into_iter()
        .map(|tag| Tag {
            score: tag.count,
            name: tag.name.trim().to_lowercase(),
        })
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}
