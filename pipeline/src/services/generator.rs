use crate::models::{
    CategoriesData, CategorySummary, CompactVideo, RecentFeed, StatsData, SubcategoryListing,
    SubcategorySummary,
};
use crate::services::aggregator::Aggregation;
use crate::taxonomy::Taxonomy;
use crate::utils::compare_published_desc;
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashSet;

pub const RECENT_FEED_SIZE: usize = 50;

/// Everything the site reads, ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFiles {
    pub listings: Vec<SubcategoryListing>,
    pub categories: CategoriesData,
    pub stats: StatsData,
    pub recent: RecentFeed,
}

pub fn generate_data_files(
    aggregation: &Aggregation,
    taxonomy: &Taxonomy,
    generated_at: DateTime<Utc>,
) -> DataFiles {
    let last_updated = generated_at.to_rfc3339_opts(SecondsFormat::Millis, true);

    let categories = build_category_summary(aggregation, taxonomy, &last_updated);
    let stats = build_stats(&categories, aggregation.unique_videos);

    DataFiles {
        listings: build_listings(aggregation, taxonomy),
        categories,
        stats,
        recent: build_recent_feed(aggregation, taxonomy),
    }
}

/// One listing per subcategory that received at least one video.
pub fn build_listings(aggregation: &Aggregation, taxonomy: &Taxonomy) -> Vec<SubcategoryListing> {
    taxonomy
        .subcategories()
        .filter_map(|(category, sub)| {
            let videos = aggregation.bucket(&sub.id);
            if videos.is_empty() {
                return None;
            }
            Some(SubcategoryListing {
                subcategory_id: sub.id.clone(),
                category_id: category.id.clone(),
                videos: videos.to_vec(),
            })
        })
        .collect()
}

/// Counts here are bucket entries: a video filed under two subcategories is
/// counted in both.
pub fn build_category_summary(
    aggregation: &Aggregation,
    taxonomy: &Taxonomy,
    last_updated: &str,
) -> CategoriesData {
    let mut total_videos = 0;
    let mut categories = Vec::with_capacity(taxonomy.categories().len());

    for category in taxonomy.categories() {
        let subcategories: Vec<SubcategorySummary> = category
            .subcategories
            .iter()
            .map(|sub| SubcategorySummary {
                id: sub.id.clone(),
                name: sub.name.clone(),
                slug: format!("{}/{}", category.id, sub.id),
                video_count: aggregation.bucket(&sub.id).len(),
            })
            .collect();

        let video_count = subcategories.iter().map(|s| s.video_count).sum();
        total_videos += video_count;

        categories.push(CategorySummary {
            id: category.id.clone(),
            name: category.name.clone(),
            icon: category.icon.clone(),
            video_count,
            subcategories,
        });
    }

    CategoriesData {
        categories,
        total_videos,
        last_updated: last_updated.to_string(),
        language_counts: aggregation.language_counts,
    }
}

/// Unlike the summary, `total_videos` here counts each video once.
pub fn build_stats(categories: &CategoriesData, unique_videos: usize) -> StatsData {
    StatsData {
        total_videos: unique_videos,
        total_categories: categories.categories.len(),
        total_subcategories: categories
            .categories
            .iter()
            .map(|c| c.subcategories.len())
            .sum(),
        language_counts: categories.language_counts,
        last_updated: categories.last_updated.clone(),
    }
}

/// Newest [`RECENT_FEED_SIZE`] distinct videos across all buckets.
///
/// Buckets are walked in taxonomy order and the first bucket a video is met
/// in supplies its `c`/`s` tags.
pub fn build_recent_feed(aggregation: &Aggregation, taxonomy: &Taxonomy) -> RecentFeed {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique: Vec<CompactVideo> = Vec::new();

    for (category, sub) in taxonomy.subcategories() {
        for video in aggregation.bucket(&sub.id) {
            if !seen.insert(video.id.as_str()) {
                continue;
            }
            let mut entry = video.clone();
            entry.category_id = Some(category.id.clone());
            entry.subcategory_id = Some(sub.id.clone());
            unique.push(entry);
        }
    }

    unique.sort_by(|a, b| compare_published_desc(&a.published, &b.published));
    unique.truncate(RECENT_FEED_SIZE);

    RecentFeed { videos: unique }
}
