use crate::services::generator::DataFiles;
use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const LISTINGS_DIR: &str = "videos-by-category";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const STATS_FILE: &str = "stats.json";
pub const RECENT_FILE: &str = "recent.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub relative_path: PathBuf,
    pub contents: Vec<u8>,
}

/// Serialize the file set. Listings and the feed are compact, the summary
/// files are pretty-printed.
pub fn render_data_files(files: &DataFiles) -> Result<Vec<RenderedFile>> {
    let mut rendered = Vec::with_capacity(files.listings.len() + 3);

    for listing in &files.listings {
        rendered.push(RenderedFile {
            relative_path: Path::new(LISTINGS_DIR).join(format!("{}.json", listing.subcategory_id)),
            contents: serde_json::to_vec(listing)
                .with_context(|| format!("serializing listing {}", listing.subcategory_id))?,
        });
    }

    rendered.push(RenderedFile {
        relative_path: PathBuf::from(CATEGORIES_FILE),
        contents: serde_json::to_vec_pretty(&files.categories).context("serializing categories")?,
    });
    rendered.push(RenderedFile {
        relative_path: PathBuf::from(STATS_FILE),
        contents: serde_json::to_vec_pretty(&files.stats).context("serializing stats")?,
    });
    rendered.push(RenderedFile {
        relative_path: PathBuf::from(RECENT_FILE),
        contents: serde_json::to_vec(&files.recent).context("serializing recent feed")?,
    });

    Ok(rendered)
}

/// Replace `output_dir` (and `public_dir`, when given) with the rendered file
/// set. Each directory is swapped in whole, so readers never see a mix of
/// old and new files and a failed run leaves the previous output untouched.
///
/// Both directories are staged before either is swapped. If the mirror swap
/// fails the output directory is rolled back too, so the two never hold
/// different generations.
pub fn write_data_files(files: &DataFiles, output_dir: &Path, public_dir: Option<&Path>) -> Result<()> {
    let rendered = render_data_files(files)?;

    let mut targets = vec![output_dir];
    targets.extend(public_dir);

    let staged = targets
        .iter()
        .map(|target| stage_directory(target, &rendered))
        .collect::<Result<Vec<_>>>()?;

    let mut swapped: Vec<Swapped> = Vec::with_capacity(staged.len());
    for staging in staged {
        match staging.swap_into_place() {
            Ok(done) => swapped.push(done),
            Err(e) => {
                for done in swapped.into_iter().rev() {
                    done.roll_back();
                }
                return Err(e);
            }
        }
    }

    for done in swapped {
        info!("Wrote {} files to {}", rendered.len(), done.target.display());
        done.finish();
    }

    Ok(())
}

/// Directory removed on drop unless it was moved into place.
struct StagingDir {
    path: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl StagingDir {
    fn create(target: &Path) -> Result<Self> {
        let path = sibling_path(target, "staging")?;
        if path.exists() {
            fs::remove_dir_all(&path)
                .with_context(|| format!("removing stale staging dir {}", path.display()))?;
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("creating staging dir {}", path.display()))?;
        Ok(Self {
            path,
            target: target.to_path_buf(),
            committed: false,
        })
    }

    /// Move the target aside and the staged tree into its place.
    fn swap_into_place(mut self) -> Result<Swapped> {
        let target = self.target.clone();
        let backup = sibling_path(&target, "previous")?;
        let had_previous = target.exists();
        if had_previous {
            if backup.exists() {
                fs::remove_dir_all(&backup)
                    .with_context(|| format!("removing stale backup {}", backup.display()))?;
            }
            fs::rename(&target, &backup)
                .with_context(|| format!("moving previous output {} aside", target.display()))?;
        }

        if let Err(e) = fs::rename(&self.path, &target) {
            if had_previous {
                restore_backup(&backup, &target);
            }
            return Err(e).with_context(|| format!("moving new output into {}", target.display()));
        }
        self.committed = true;

        Ok(Swapped {
            target,
            backup: had_previous.then_some(backup),
        })
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

/// A directory already holding the new files, with the previous generation
/// kept aside until the whole write succeeds.
struct Swapped {
    target: PathBuf,
    backup: Option<PathBuf>,
}

impl Swapped {
    fn roll_back(self) {
        if let Err(e) = fs::remove_dir_all(&self.target) {
            warn!("Could not remove new output {}: {e}", self.target.display());
        }
        if let Some(backup) = &self.backup {
            restore_backup(backup, &self.target);
        }
    }

    fn finish(self) {
        if let Some(backup) = &self.backup {
            if let Err(e) = fs::remove_dir_all(backup) {
                warn!("Could not remove previous output {}: {e}", backup.display());
            }
        }
    }
}

fn restore_backup(backup: &Path, target: &Path) {
    if let Err(e) = fs::rename(backup, target) {
        warn!(
            "Could not restore previous output of {}, it is left in {}: {e}",
            target.display(),
            backup.display()
        );
    }
}

fn sibling_path(target: &Path, tag: &str) -> Result<PathBuf> {
    let name = target
        .file_name()
        .with_context(|| format!("output path {} has no directory name", target.display()))?
        .to_string_lossy();
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok(parent.join(format!(".{name}.{tag}-{}", std::process::id())))
}

fn stage_directory(target: &Path, rendered: &[RenderedFile]) -> Result<StagingDir> {
    let staging = StagingDir::create(target)?;

    for file in rendered {
        let path = staging.path.join(&file.relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        fs::write(&path, &file.contents)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(staging)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoriesData, LanguageCounts, RecentFeed, StatsData};

    fn replace_directory(target: &Path, rendered: &[RenderedFile]) -> Result<()> {
        stage_directory(target, rendered)?.swap_into_place()?.finish();
        Ok(())
    }

    fn data_files(last_updated: &str) -> DataFiles {
        DataFiles {
            listings: Vec::new(),
            categories: CategoriesData {
                categories: Vec::new(),
                total_videos: 0,
                last_updated: last_updated.to_string(),
                language_counts: LanguageCounts::default(),
            },
            stats: StatsData {
                total_videos: 0,
                total_categories: 0,
                total_subcategories: 0,
                language_counts: LanguageCounts::default(),
                last_updated: last_updated.to_string(),
            },
            recent: RecentFeed::default(),
        }
    }

    fn file(path: &str, contents: &str) -> RenderedFile {
        RenderedFile {
            relative_path: PathBuf::from(path),
            contents: contents.as_bytes().to_vec(),
        }
    }

    fn leftovers(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with('.'))
            .collect()
    }

    #[test]
    fn replaces_previous_contents_entirely() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("processed");

        replace_directory(&target, &[file("a.json", "1"), file("sub/b.json", "2")]).unwrap();
        replace_directory(&target, &[file("a.json", "3")]).unwrap();

        assert_eq!(fs::read_to_string(target.join("a.json")).unwrap(), "3");
        assert!(!target.join("sub/b.json").exists());
        assert!(leftovers(root.path()).is_empty());
    }

    #[test]
    fn failed_write_keeps_previous_output() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("processed");
        replace_directory(&target, &[file("a.json", "old")]).unwrap();

        // "a" is written as a file, so "a/b.json" cannot be created
        let result = replace_directory(&target, &[file("a", "x"), file("a/b.json", "y")]);

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(target.join("a.json")).unwrap(), "old");
        assert!(leftovers(root.path()).is_empty());
    }

    #[test]
    fn mirror_failure_leaves_output_on_the_previous_generation() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("processed");
        write_data_files(&data_files("first"), &out, None).unwrap();

        // A regular file where the mirror's parent directory should be
        fs::write(root.path().join("blocker"), "").unwrap();
        let public = root.path().join("blocker").join("processed");

        let result = write_data_files(&data_files("second"), &out, Some(&public));

        assert!(result.is_err());
        let stats = fs::read_to_string(out.join(STATS_FILE)).unwrap();
        assert!(stats.contains("first"));
        assert!(leftovers(root.path()).is_empty());
    }

    #[test]
    fn both_directories_get_the_same_generation() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("processed");
        let public = root.path().join("public").join("processed");

        write_data_files(&data_files("first"), &out, Some(&public)).unwrap();
        write_data_files(&data_files("second"), &out, Some(&public)).unwrap();

        for dir in [&out, &public] {
            let stats = fs::read_to_string(dir.join(STATS_FILE)).unwrap();
            assert!(stats.contains("second"));
        }
    }

    #[test]
    fn roll_back_restores_the_previous_generation() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("processed");
        replace_directory(&target, &[file("a.json", "new")]).unwrap();
        let backup = sibling_path(&target, "previous").unwrap();
        fs::create_dir_all(&backup).unwrap();
        fs::write(backup.join("a.json"), "old").unwrap();

        Swapped {
            target: target.clone(),
            backup: Some(backup.clone()),
        }
        .roll_back();

        assert_eq!(fs::read_to_string(target.join("a.json")).unwrap(), "old");
        assert!(!backup.exists());
    }
}
