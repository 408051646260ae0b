use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scrobble_tags::config::{
    AppConfig, CliConfig, FileConfig, PipelineSettings, API_KEY_ENV_VAR, USERNAME_ENV_VAR,
};
use scrobble_tags::throttle::TokioPacer;
use scrobble_tags::{run_aggregate, run_collect, LastFmClient, Routine, TimeWindow};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Routine to run: "collect" (full pipeline) or "aggregate" (re-rank
    /// existing tracks-data files). Unknown names do nothing.
    #[clap(default_value = "collect")]
    pub routine: String,

    /// Path to a TOML config file. Its values override command line flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory the JSON artifacts are written to.
    #[clap(long, value_parser = parse_path)]
    pub output_dir: Option<PathBuf>,

    /// Time window to collect; repeat for several. Defaults to overall.
    #[clap(long = "window", value_enum)]
    pub windows: Vec<TimeWindow>,

    /// Milliseconds to idle after each top-tracks page request.
    #[clap(long)]
    pub page_interval_ms: Option<u64>,

    /// Milliseconds to idle after each track tag request.
    #[clap(long)]
    pub track_interval_ms: Option<u64>,

    /// Continue from an existing tracks-data file instead of starting over.
    #[clap(long)]
    pub resume: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            username: std::env::var(USERNAME_ENV_VAR).ok(),
            api_key: std::env::var(API_KEY_ENV_VAR).ok(),
            output_dir: self.output_dir.clone(),
            windows: self.windows.clone(),
            page_interval_ms: self.page_interval_ms,
            track_interval_ms: self.track_interval_ms,
            resume: self.resume,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine, credentials may come from the environment.
    let _ = dotenvy::dotenv();

    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let Some(routine) = Routine::from_name(&cli_args.routine) else {
        debug!("Unknown routine {:?}, nothing to do", cli_args.routine);
        return Ok(());
    };

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let cli_config = cli_args.to_cli_config();

    match routine {
        Routine::Collect => {
            let config = AppConfig::resolve(&cli_config, file_config)?;
            let client = LastFmClient::new(
                &config.api_base_url,
                &config.username,
                &config.api_key,
                config.request_timeout_sec,
            )
            .context("Failed to create Last.fm client")?;

            info!(
                "Collecting top tracks of {} into {:?}",
                config.username, config.pipeline.output_dir
            );
            let summaries = run_collect(&config.pipeline, &client, &TokioPacer).await?;
            for summary in summaries {
                info!(
                    "{}: saved {} tracks and {} tags",
                    summary.window, summary.tracks, summary.tags
                );
            }
        }
        Routine::Aggregate => {
            let settings =
                PipelineSettings::resolve(&cli_config, &file_config.unwrap_or_default())?;
            let summaries = run_aggregate(&settings)?;
            for summary in summaries {
                info!(
                    "{}: ranked {} tags from {} tracks",
                    summary.window, summary.tags, summary.tracks
                );
            }
        }
    }

    Ok(())
}
