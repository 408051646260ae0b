mod file_config;

pub use file_config::{FileConfig, LastFmConfig, PacingFileConfig};

use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::lastfm::{TimeWindow, LASTFM_API_BASE};
use crate::throttle::PacingConfig;

pub const USERNAME_ENV_VAR: &str = "LASTFM_API_USERNAME";
pub const API_KEY_ENV_VAR: &str = "LASTFM_API_KEY";

/// CLI arguments (and environment credentials) used for config resolution.
/// Mirrors the settings that can be overridden by the TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub username: Option<String>,
    pub api_key: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub windows: Vec<TimeWindow>,
    pub page_interval_ms: Option<u64>,
    pub track_interval_ms: Option<u64>,
    pub resume: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Credentials
    pub username: String,
    pub api_key: String,

    // Remote service
    pub api_base_url: String,
    pub request_timeout_sec: u64,

    pub pipeline: PipelineSettings,
}

/// Settings consumed by the collection pipeline.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub output_dir: PathBuf,
    pub windows: Vec<TimeWindow>,
    pub pacing: PacingConfig,
    /// Continue from an existing tracks-data snapshot instead of starting over.
    pub resume: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            windows: vec![TimeWindow::Overall],
            pacing: PacingConfig::default(),
            resume: false,
        }
    }
}

fn required_credential(value: Option<&String>, env_var: &str) -> Result<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| anyhow!("{} must be set in the environment or a .env file", env_var))
}

impl PipelineSettings {
    /// Resolve pipeline settings from CLI arguments and the TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file: &FileConfig) -> Result<Self> {
        let defaults = Self::default();

        let output_dir = file
            .output_dir
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| cli.output_dir.clone())
            .unwrap_or(defaults.output_dir);

        if output_dir.exists() && !output_dir.is_dir() {
            bail!("output_dir is not a directory: {:?}", output_dir);
        }

        let mut windows = file.windows.clone().unwrap_or_else(|| cli.windows.clone());
        if windows.is_empty() {
            windows = defaults.windows;
        }
        // Same window listed twice would overwrite its own artifacts.
        let mut unique = Vec::with_capacity(windows.len());
        for window in windows {
            if !unique.contains(&window) {
                unique.push(window);
            }
        }

        let pacing_file = file.pacing.clone().unwrap_or_default();
        let pacing = PacingConfig {
            page_interval: pacing_file
                .page_interval_ms
                .or(cli.page_interval_ms)
                .map(Duration::from_millis)
                .unwrap_or(defaults.pacing.page_interval),
            track_interval: pacing_file
                .track_interval_ms
                .or(cli.track_interval_ms)
                .map(Duration::from_millis)
                .unwrap_or(defaults.pacing.track_interval),
        };

        Ok(Self {
            output_dir,
            windows: unique,
            pacing,
            resume: file.resume.unwrap_or(cli.resume),
        })
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    ///
    /// Fails before any request is made if a credential is missing.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let username = required_credential(cli.username.as_ref(), USERNAME_ENV_VAR)?;
        let api_key = required_credential(cli.api_key.as_ref(), API_KEY_ENV_VAR)?;

        let pipeline = PipelineSettings::resolve(cli, &file)?;

        let lastfm = file.lastfm.unwrap_or_default();
        let api_base_url = lastfm
            .api_base_url
            .unwrap_or_else(|| LASTFM_API_BASE.to_string());
        let request_timeout_sec = lastfm.request_timeout_sec.unwrap_or(30);

        Ok(Self {
            username,
            api_key,
            api_base_url,
            request_timeout_sec,
            pipeline,
        })
    }
}
