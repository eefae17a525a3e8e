use crate::models::RawVideo;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

pub fn load_raw_videos(path: &Path) -> Result<Vec<RawVideo>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("{} not found. Run a fetch first.", path.display()))?;
    let videos: Vec<RawVideo> = serde_json::from_str(&json)
        .with_context(|| format!("parsing raw videos from {}", path.display()))?;
    info!("Loaded {} videos from {}", videos.len(), path.display());
    Ok(videos)
}

/// Written to a temp file first and renamed, so an interrupted save never
/// truncates the previous cache.
pub fn save_raw_videos(path: &Path, videos: &[RawVideo]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let json = serde_json::to_vec_pretty(videos).context("serializing raw videos")?;
    let tmp = path.with_extension(format!("json.tmp-{}", std::process::id()));
    fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("replacing {}", path.display()));
    }

    info!("Raw videos saved to {}", path.display());
    Ok(())
}
