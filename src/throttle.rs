//! Request pacing for outbound Last.fm calls.
//!
//! The pipeline idles for a fixed interval after every remote call. Listing
//! pages and per-track tag lookups use separate intervals.

use async_trait::async_trait;
use std::time::Duration;

/// Trait for idling between consecutive remote calls.
#[async_trait]
pub trait RequestPacer: Send + Sync {
    /// Suspend the caller for at least `interval`. Never fails.
    async fn wait(&self, interval: Duration);
}

/// Intervals applied by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    /// Idle time after each top-tracks page fetch
    pub page_interval: Duration,
    /// Idle time after each track tag lookup
    pub track_interval: Duration,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            page_interval: Duration::from_millis(250),
            track_interval: Duration::from_millis(250),
        }
    }
}

/// Pacer backed by the tokio timer.
pub struct TokioPacer;

#[async_trait]
impl RequestPacer for TokioPacer {
    async fn wait(&self, interval: Duration) {
        if !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
    }
}

/// Pacer that never waits.
pub struct NoOpPacer;

#[async_trait]
impl RequestPacer for NoOpPacer {
    async fn wait(&self, _interval: Duration) {}
}

/// Pacer that records every requested interval without waiting.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingPacer {
    intervals: std::sync::Mutex<Vec<Duration>>,
}

#[cfg(test)]
impl RecordingPacer {
    pub fn intervals(&self) -> Vec<Duration> {
        self.intervals.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl RequestPacer for RecordingPacer {
    async fn wait(&self, interval: Duration) {
        self.intervals.lock().unwrap().push(interval);
    }
}
