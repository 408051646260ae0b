//! Scrobble Tags Library
//!
//! Collects a Last.fm user's top tracks, enriches them with community tags
//! and ranks the tags per time window.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod lastfm;
pub mod pipeline;
pub mod tags;
pub mod throttle;

// Re-export commonly used types for convenience
pub use error::{FilesystemError, PipelineError, RemoteError};
pub use lastfm::{LastFmClient, ScrobbleCatalog, TimeWindow};
pub use pipeline::{run_aggregate, run_collect, Routine, WindowSummary};
pub use tags::{aggregate, normalize, EnrichedTrack, Tag, TagTable};
