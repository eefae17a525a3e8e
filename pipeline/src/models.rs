use serde::{Deserialize, Serialize};
use std::fmt;

/// One item of the source catalog, as produced by the fetcher or read back
/// from the raw cache.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawVideo {
    #[serde(alias = "id")]
    pub video_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(alias = "published", default, deserialize_with = "null_as_empty")]
    pub published_at: String, // ISO 8601
    #[serde(default, deserialize_with = "null_as_empty")]
    pub thumbnail: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Telugu,
    Mixed,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "english"),
            Self::Telugu => write!(f, "telugu"),
            Self::Mixed => write!(f, "mixed"),
        }
    }
}

/// Per-video record stored in every listing and feed. Keys are kept short
/// because the site downloads whole listings at once.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CompactVideo {
    pub id: String,
    #[serde(rename = "t")]
    pub title: String,
    #[serde(rename = "d")]
    pub description: String,
    #[serde(rename = "p")]
    pub published: String, // YYYY-MM-DD
    #[serde(rename = "th")]
    pub thumbnail: String,
    #[serde(rename = "l")]
    pub language: Language,
    // Only set in recent.json
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageCounts {
    pub english: usize,
    pub telugu: usize,
    pub mixed: usize,
}

impl LanguageCounts {
    pub fn record(&mut self, language: Language) {
        match language {
            Language::English => self.english += 1,
            Language::Telugu => self.telugu += 1,
            Language::Mixed => self.mixed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.english + self.telugu + self.mixed
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryListing {
    pub subcategory_id: String,
    pub category_id: String,
    pub videos: Vec<CompactVideo>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubcategorySummary {
    pub id: String,
    pub name: String,
    pub slug: String, // categoryId/subcategoryId
    pub video_count: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub video_count: usize,
    pub subcategories: Vec<SubcategorySummary>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesData {
    pub categories: Vec<CategorySummary>,
    pub total_videos: usize,
    pub last_updated: String,
    pub language_counts: LanguageCounts,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub total_videos: usize,
    pub total_categories: usize,
    pub total_subcategories: usize,
    pub language_counts: LanguageCounts,
    pub last_updated: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RecentFeed {
    pub videos: Vec<CompactVideo>,
}
