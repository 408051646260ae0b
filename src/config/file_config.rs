use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::lastfm::TimeWindow;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub output_dir: Option<String>,
    pub windows: Option<Vec<TimeWindow>>,
    pub resume: Option<bool>,

    // Feature configs
    pub lastfm: Option<LastFmConfig>,
    pub pacing: Option<PacingFileConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct LastFmConfig {
    pub api_base_url: Option<String>,
    pub request_timeout_sec: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct PacingFileConfig {
    pub page_interval_ms: Option<u64>,
    pub track_interval_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
