use anyhow::{Context, Result};
use archive_pipeline::config::{init_logger, load_environment, Cli};
use archive_pipeline::models::RawVideo;
use archive_pipeline::pipeline::run_and_write;
use archive_pipeline::services::raw_cache::load_raw_videos;
use archive_pipeline::services::sample::sample_raw_videos;
use archive_pipeline::taxonomy::Taxonomy;
use chrono::Utc;
use clap::Parser;
use log::{info, warn};

async fn obtain_raw_videos(cli: &Cli) -> Result<Vec<RawVideo>> {
    if cli.sample {
        let videos = sample_raw_videos();
        info!("Using {} synthetic sample videos", videos.len());
        return Ok(videos);
    }
    if cli.skip_fetch {
        info!("Skipping fetch, reading {}", cli.raw.display());
        return load_raw_videos(&cli.raw);
    }
    fetch_raw_videos(cli).await
}

#[cfg(feature = "youtube_data_api")]
async fn fetch_raw_videos(cli: &Cli) -> Result<Vec<RawVideo>> {
    use archive_pipeline::config::{CHANNEL_HANDLE, YOUTUBE_API_KEY};
    use archive_pipeline::services::fetcher::fetch_channel_videos;
    use archive_pipeline::services::raw_cache::save_raw_videos;

    let Some(api_key) = YOUTUBE_API_KEY.as_deref() else {
        warn!("YOUTUBE_API_KEY is not set, falling back to {}", cli.raw.display());
        return load_raw_videos(&cli.raw);
    };

    let videos = fetch_channel_videos(api_key, &CHANNEL_HANDLE).await?;
    save_raw_videos(&cli.raw, &videos)?;
    Ok(videos)
}

#[cfg(not(feature = "youtube_data_api"))]
async fn fetch_raw_videos(cli: &Cli) -> Result<Vec<RawVideo>> {
    warn!(
        "Built without the youtube_data_api feature, reading {}",
        cli.raw.display()
    );
    load_raw_videos(&cli.raw)
}

#[tokio::main]
async fn main() -> Result<()> {
    load_environment();
    init_logger();
    let cli = Cli::parse();

    let taxonomy = match &cli.taxonomy {
        Some(path) => Taxonomy::from_path(path)
            .with_context(|| format!("loading taxonomy from {}", path.display()))?,
        None => Taxonomy::bundled().context("loading bundled taxonomy")?,
    };

    let raw_videos = obtain_raw_videos(&cli).await?;
    let result = run_and_write(
        &raw_videos,
        &taxonomy,
        Utc::now(),
        &cli.out,
        cli.public_dir(),
    )?;

    let stats = &result.files.stats;
    info!("Pipeline complete!");
    info!("  Videos: {}", stats.total_videos);
    info!(
        "  Categories: {} ({} subcategories)",
        stats.total_categories, stats.total_subcategories
    );
    info!("  Listings written: {}", result.files.listings.len());
    info!("  Recent feed: {} videos", result.files.recent.videos.len());
    info!(
        "  Languages: {} english, {} telugu, {} mixed",
        stats.language_counts.english, stats.language_counts.telugu, stats.language_counts.mixed
    );
    Ok(())
}
