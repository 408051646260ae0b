//! Collection pipeline: traverse → enrich → aggregate.
//!
//! Runs strictly sequentially on the calling task. Windows are processed one
//! after another and each writes its own set of artifacts.

mod enrich;
mod traverse;

pub use enrich::enrich_tracks;
pub use traverse::collect_top_tracks;

use std::path::Path;
use tracing::info;

use crate::artifacts::{read_tracks_data, write_tag_artifacts, ArtifactPaths};
use crate::config::PipelineSettings;
use crate::error::{FilesystemError, PipelineResult};
use crate::lastfm::{ScrobbleCatalog, TimeWindow};
use crate::tags::aggregate;
use crate::throttle::RequestPacer;

/// Top-level routines selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routine {
    /// Traverse, enrich and aggregate every configured window.
    Collect,
    /// Re-aggregate previously written tracks-data files.
    Aggregate,
}

impl Routine {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "collect" => Some(Routine::Collect),
            "aggregate" => Some(Routine::Aggregate),
            _ => None,
        }
    }
}

/// Outcome of one window's run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSummary {
    pub window: TimeWindow,
    pub tracks: usize,
    pub tags: usize,
}

fn ensure_output_dir(dir: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(dir).map_err(|source| FilesystemError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

/// Run the full pipeline for every configured window.
pub async fn run_collect(
    settings: &PipelineSettings,
    catalog: &dyn ScrobbleCatalog,
    pacer: &dyn RequestPacer,
) -> PipelineResult<Vec<WindowSummary>> {
    ensure_output_dir(&settings.output_dir)?;

    let mut summaries = Vec::with_capacity(settings.windows.len());
    for &window in &settings.windows {
        info!("Collecting top tracks for window {}", window);
        let paths = ArtifactPaths::for_window(&settings.output_dir, window);

        let tracks =
            collect_top_tracks(catalog, pacer, settings.pacing.page_interval, Some(window))
                .await?;

        let previous = if settings.resume && paths.tracks_data().exists() {
            read_tracks_data(&paths)?
        } else {
            Vec::new()
        };

        let enriched = enrich_tracks(
            catalog,
            pacer,
            settings.pacing.track_interval,
            &tracks,
            &paths.tracks_data(),
            previous,
        )
        .await?;

        let table = aggregate(&enriched);
        write_tag_artifacts(&paths, &table)?;
        match table.ranked().first() {
            Some((name, score)) => info!(
                "Window {}: {} tracks, {} distinct tags, top tag {} ({})",
                window,
                enriched.len(),
                table.len(),
                name,
                score
            ),
            None => info!("Window {}: {} tracks, no tags", window, enriched.len()),
        }

        summaries.push(WindowSummary {
            window,
            tracks: enriched.len(),
            tags: table.len(),
        });
    }

    Ok(summaries)
}

/// Aggregate the tracks-data file of every configured window without
/// contacting the remote service.
pub fn run_aggregate(settings: &PipelineSettings) -> PipelineResult<Vec<WindowSummary>> {
    let mut summaries = Vec::with_capacity(settings.windows.len());
    for &window in &settings.windows {
        let paths = ArtifactPaths::for_window(&settings.output_dir, window);
        info!("Aggregating tags from {:?}", paths.tracks_data());

        let tracks = read_tracks_data(&paths)?;
        let table = aggregate(&tracks);
        write_tag_artifacts(&paths, &table)?;

        summaries.push(WindowSummary {
            window,
            tracks: tracks.len(),
            tags: table.len(),
        });
    }
    Ok(summaries)
}
