use crate::models::{CompactVideo, Language, LanguageCounts, RawVideo};
use crate::services::classifier::classify_video;
use crate::services::language::detect_language;
use crate::taxonomy::Taxonomy;
use crate::utils::{
    compare_published_desc, parse_iso8601_to_day, truncate_chars, youtube_thumbnail_url,
    DESCRIPTION_MAX_CHARS,
};
use log::{debug, info};
use std::collections::{BTreeMap, HashSet};

/// Subcategory id -> videos filed there, newest first.
pub type BucketMap = BTreeMap<String, Vec<CompactVideo>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub buckets: BucketMap,
    pub language_counts: LanguageCounts,
    /// Distinct video ids seen, independent of how many buckets they landed in.
    pub unique_videos: usize,
}

impl Aggregation {
    pub fn bucket(&self, subcategory_id: &str) -> &[CompactVideo] {
        self.buckets
            .get(subcategory_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of bucket entries, counting a video once per bucket.
    pub fn total_assignments(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

pub fn to_compact_video(raw: &RawVideo, language: Language) -> CompactVideo {
    let thumbnail = if raw.thumbnail.is_empty() {
        youtube_thumbnail_url(&raw.video_id)
    } else {
        raw.thumbnail.clone()
    };

    CompactVideo {
        id: raw.video_id.clone(),
        title: raw.title.clone(),
        description: truncate_chars(&raw.description, DESCRIPTION_MAX_CHARS),
        published: parse_iso8601_to_day(&raw.published_at),
        thumbnail,
        language,
        category_id: None,
        subcategory_id: None,
    }
}

/// File every video into its primary (and, if any, secondary) bucket.
///
/// Videos are appended in input order and each bucket is sorted afterwards,
/// so equal days keep their input order.
pub fn categorize_all_videos(raw_videos: &[RawVideo], taxonomy: &Taxonomy) -> Aggregation {
    info!("Categorizing {} videos...", raw_videos.len());

    let mut buckets = BucketMap::new();
    let mut language_counts = LanguageCounts::default();
    let mut seen_ids = HashSet::new();

    for raw in raw_videos {
        let language = detect_language(&raw.title, &raw.description);
        let classification = classify_video(raw, taxonomy);
        let compact = to_compact_video(raw, language);

        if let Some(secondary) = classification.secondary {
            buckets
                .entry(secondary)
                .or_default()
                .push(compact.clone());
        }
        buckets
            .entry(classification.primary)
            .or_default()
            .push(compact);

        language_counts.record(language);
        seen_ids.insert(raw.video_id.as_str());
    }

    for videos in buckets.values_mut() {
        videos.sort_by(|a, b| compare_published_desc(&a.published, &b.published));
    }

    let aggregation = Aggregation {
        buckets,
        language_counts,
        unique_videos: seen_ids.len(),
    };
    log_distribution(&aggregation, taxonomy);
    aggregation
}

fn log_distribution(aggregation: &Aggregation, taxonomy: &Taxonomy) {
    let counts = &aggregation.language_counts;
    info!(
        "Categorization complete: total={}, english={}, telugu={}, mixed={}",
        counts.total(),
        counts.english,
        counts.telugu,
        counts.mixed
    );

    for category in taxonomy.categories() {
        let mut category_total = 0;
        for sub in &category.subcategories {
            let count = aggregation.bucket(&sub.id).len();
            category_total += count;
            if count > 0 {
                debug!("  {} > {}: {count} videos", category.name, sub.name);
            }
        }
        info!("  {}: {category_total} videos", category.name);
    }
}
