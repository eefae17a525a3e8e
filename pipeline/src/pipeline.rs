use crate::models::RawVideo;
use crate::services::aggregator::{categorize_all_videos, Aggregation};
use crate::services::generator::{generate_data_files, DataFiles};
use crate::services::writer::write_data_files;
use crate::taxonomy::Taxonomy;
use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub aggregation: Aggregation,
    pub files: DataFiles,
}

/// Categorize the raw catalog and build the data files in memory.
pub fn run(raw_videos: &[RawVideo], taxonomy: &Taxonomy, generated_at: DateTime<Utc>) -> PipelineRun {
    let aggregation = categorize_all_videos(raw_videos, taxonomy);
    let files = generate_data_files(&aggregation, taxonomy, generated_at);
    PipelineRun { aggregation, files }
}

/// `run`, then persist the result.
pub fn run_and_write(
    raw_videos: &[RawVideo],
    taxonomy: &Taxonomy,
    generated_at: DateTime<Utc>,
    output_dir: &Path,
    public_dir: Option<&Path>,
) -> Result<PipelineRun> {
    let result = run(raw_videos, taxonomy, generated_at);
    info!(
        "Generated {} listings, {} recent videos",
        result.files.listings.len(),
        result.files.recent.videos.len()
    );
    write_data_files(&result.files, output_dir, public_dir)?;
    Ok(result)
}
