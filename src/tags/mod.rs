//! Tag normalization and aggregation.

mod aggregate;
mod models;
mod normalize;

pub use aggregate::{aggregate, TagTable, TOP_SLICE_SIZES};
pub use models::{EnrichedTrack, Tag};
pub use normalize::{normalize, MAX_TAG_NAME_LEN, MIN_TAG_COUNT, MIN_TAG_NAME_LEN};
