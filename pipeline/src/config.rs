use clap::Parser;
use env_logger::{Builder, Env};
use lazy_static::lazy_static;
use log::info;
use std::env;
use std::path::PathBuf;

lazy_static! {
    pub static ref YOUTUBE_API_KEY: Option<String> =
        env::var("YOUTUBE_API_KEY").ok().filter(|key| !key.is_empty());
    pub static ref CHANNEL_HANDLE: String =
        env::var("CHANNEL_HANDLE").unwrap_or_else(|_| "sivanandasastry9364".to_string());
}

pub fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Starting archive data pipeline...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

/// fetch -> categorize -> generate data files
#[derive(Parser, Debug, Clone)]
#[command(name = "archive-pipeline", about = "Build the video archive data files")]
pub struct Cli {
    /// Skip the fetch and use the existing raw cache
    #[arg(long)]
    pub skip_fetch: bool,

    /// Use the built-in synthetic catalog instead of fetching or the cache
    #[arg(long, conflicts_with = "skip_fetch")]
    pub sample: bool,

    /// Raw video cache (read with --skip-fetch, written after a fetch)
    #[arg(long, env = "RAW_VIDEOS_PATH", default_value = "data/raw/all-videos.json")]
    pub raw: PathBuf,

    /// Directory the data files are generated into
    #[arg(long, env = "OUTPUT_DIR", default_value = "data/processed")]
    pub out: PathBuf,

    /// Directory the site serves; gets an identical copy
    #[arg(long, env = "PUBLIC_DATA_DIR", default_value = "public/data/processed")]
    pub public: PathBuf,

    /// Only write the output directory
    #[arg(long)]
    pub no_public: bool,

    /// Taxonomy JSON; defaults to the bundled one
    #[arg(long, env = "TAXONOMY_PATH")]
    pub taxonomy: Option<PathBuf>,
}

impl Cli {
    pub fn public_dir(&self) -> Option<&std::path::Path> {
        if self.no_public || self.public == self.out {
            None
        } else {
            Some(self.public.as_path())
        }
    }
}
