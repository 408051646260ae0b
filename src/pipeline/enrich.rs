//! Per-track tag enrichment with a checkpoint after every track.
//!
//! After each track the whole accumulator is written to the window's
//! tracks-data file, so the file on disk is always a complete JSON array of
//! the first *i* enriched tracks.

use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::artifacts::write_json_pretty;
use crate::error::PipelineResult;
use crate::lastfm::{RawTrackEntry, ScrobbleCatalog};
use crate::tags::{normalize, EnrichedTrack};
use crate::throttle::RequestPacer;

/// Fetch and normalize tags for `tracks` in order, flushing to `snapshot_path`
/// after each one.
///
/// `already_enriched` seeds the accumulator with the entries of a previous
/// run; that many leading tracks are skipped. Pass an empty vector to start
/// from the first track.
pub async fn enrich_tracks(
    catalog: &dyn ScrobbleCatalog,
    pacer: &dyn RequestPacer,
    track_interval: Duration,
    tracks: &[RawTrackEntry],
    snapshot_path: &Path,
    already_enriched: Vec<EnrichedTrack>,
) -> PipelineResult<Vec<EnrichedTrack>> {
    let mut enriched = already_enriched;
    let skip = enriched.len();

    if skip > tracks.len() {
        warn!(
            "Snapshot holds {} tracks but only {} were collected, nothing to enrich",
            skip,
            tracks.len()
        );
        return Ok(enriched);
    }
    if skip > 0 {
        info!("Resuming enrichment after {} tracks", skip);
    }

    let total = tracks.len();
    for (i, track) in tracks.iter().enumerate().skip(skip) {
        info!("{}/{}: Downloading track data and tags.", i + 1, total);

        let raw_tags = catalog.fetch_track_tags(&track.name, &track.artist).await?;
        let tags = normalize(&raw_tags);

        info!(
            "    {} by {} ({}): {}",
            track.name,
            track.artist,
            track.playcount,
            tags.iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        enriched.push(EnrichedTrack {
            name: track.name.clone(),
            artist: track.artist.clone(),
            image_url: track.best_image_url().to_string(),
            playcount: track.playcount,
            tags,
        });

        pacer.wait(track_interval).await;

        write_json_pretty(snapshot_path, &enriched)?;
    }

    info!("Saved {} tracks to {:?}", enriched.len(), snapshot_path);
    Ok(enriched)
}
