//! Exhaustive traversal of a paginated top-tracks listing.
//!
//! The server is the source of truth for pagination: after each fetch the
//! next page is the *reported* page plus one and the loop ends once it
//! exceeds the most recently *reported* total. A server that skips pages or
//! shrinks its total therefore changes how many tracks are collected; a
//! server that reports a page lower than the one requested is rejected
//! with [`RemoteError::PageRegression`]. A reported page of `u32::MAX` is
//! always the last one.

use std::time::Duration;
use tracing::info;

use crate::error::RemoteError;
use crate::lastfm::{RawTrackEntry, ScrobbleCatalog, TimeWindow};
use crate::throttle::RequestPacer;

/// Fetch every page of the user's top tracks for `window`.
///
/// Tracks are returned in page order, then in listing order within a page.
/// Any fetch failure aborts the traversal; nothing is retried.
pub async fn collect_top_tracks(
    catalog: &dyn ScrobbleCatalog,
    pacer: &dyn RequestPacer,
    page_interval: Duration,
    window: Option<TimeWindow>,
) -> Result<Vec<RawTrackEntry>, RemoteError> {
    let mut tracks = Vec::new();
    let mut page = 1u32;
    let mut total_pages = 1u32;

    while page <= total_pages {
        let result = catalog.fetch_track_page(page, window).await?;
        if result.page < page {
            return Err(RemoteError::PageRegression {
                requested: page,
                reported: result.page,
            });
        }

        tracks.extend(result.tracks);

        pacer.wait(page_interval).await;

        info!(
            "{}/{}: Fetched top tracks page (total {} tracks)",
            result.page,
            result.total_pages,
            tracks.len()
        );

        total_pages = result.total_pages;
        // No page can follow u32::MAX.
        match result.page.checked_add(1) {
            Some(next) => page = next,
            None => break,
        }
    }

    Ok(tracks)
}
