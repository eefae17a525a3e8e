//! Topic taxonomy: categories, their subcategories and the weighted text
//! rules used to file videos into them.
//!
//! The taxonomy is authored as JSON (see `data/taxonomy.json`, bundled into
//! the binary) and compiled once into a [`Taxonomy`]. Every configuration
//! mistake is reported by [`Taxonomy::from_definition`] so that a bad rule
//! table never reaches the classifier.

use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BUNDLED_TAXONOMY: &str = include_str!("../data/taxonomy.json");

const DEFAULT_WEIGHT: u32 = 5;
const DEFAULT_FALLBACK: &str = "other";

lazy_static! {
    static ref ID_FORMAT: Regex = Regex::new(r"^[a-z0-9][a-z0-9-]*$").unwrap();
}

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("failed to read taxonomy from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("taxonomy is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("taxonomy defines no categories")]
    Empty,
    #[error("category `{0}` has no subcategories")]
    EmptyCategory(String),
    #[error("`{0}` is not a valid id (lowercase letters, digits and dashes only)")]
    InvalidId(String),
    #[error("duplicate category id `{0}`")]
    DuplicateCategory(String),
    #[error("duplicate subcategory id `{0}`")]
    DuplicateSubcategory(String),
    #[error("invalid pattern {pattern:?} in subcategory `{subcategory}`: {source}")]
    InvalidPattern {
        subcategory: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error(
        "subcategory `{subcategory}` has weight {weight} but no match rules; only a catch-all with weight 0 may omit rules"
    )]
    MissingRules { subcategory: String, weight: u32 },
    #[error("subcategory `{0}` has match rules but weight 0")]
    ZeroWeight(String),
    #[error("catch-all subcategory `{0}` must not carry exclusion rules")]
    CatchAllWithExclusions(String),
    #[error("category `{0}` declares more than one catch-all subcategory")]
    MultipleCatchAlls(String),
    #[error("fallback subcategory `{0}` is not defined")]
    UnknownFallback(String),
    #[error("fallback subcategory `{0}` is not a catch-all")]
    FallbackNotCatchAll(String),
}

fn default_weight() -> u32 {
    DEFAULT_WEIGHT
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK.to_string()
}

/// Taxonomy as authored, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyDefinition {
    #[serde(default = "default_fallback")]
    pub fallback: String,
    pub categories: Vec<CategoryDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub subcategories: Vec<SubcategoryDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub negative_patterns: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

#[derive(Debug, Clone)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    pub patterns: Vec<Regex>,
    pub negative_patterns: Vec<Regex>,
    pub weight: u32,
}

impl Subcategory {
    /// A catch-all has no rules and can only be reached as the fallback.
    pub fn is_catch_all(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<Category>,
    fallback: String,
}

impl Taxonomy {
    /// The taxonomy shipped with the crate.
    pub fn bundled() -> Result<Self, TaxonomyError> {
        Self::from_json(BUNDLED_TAXONOMY)
    }

    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let definition: TaxonomyDefinition = serde_json::from_str(json)?;
        Self::from_definition(definition)
    }

    pub fn from_path(path: &Path) -> Result<Self, TaxonomyError> {
        let json = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_definition(definition: TaxonomyDefinition) -> Result<Self, TaxonomyError> {
        if definition.categories.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        let mut category_ids = HashSet::new();
        let mut subcategory_ids = HashSet::new();
        let mut categories = Vec::with_capacity(definition.categories.len());

        for category_def in definition.categories {
            check_id(&category_def.id)?;
            if !category_ids.insert(category_def.id.clone()) {
                return Err(TaxonomyError::DuplicateCategory(category_def.id));
            }
            if category_def.subcategories.is_empty() {
                return Err(TaxonomyError::EmptyCategory(category_def.id));
            }

            let mut subcategories = Vec::with_capacity(category_def.subcategories.len());
            for sub_def in category_def.subcategories {
                check_id(&sub_def.id)?;
                // Bucket files are named by subcategory id alone.
                if !subcategory_ids.insert(sub_def.id.clone()) {
                    return Err(TaxonomyError::DuplicateSubcategory(sub_def.id));
                }
                subcategories.push(compile_subcategory(sub_def)?);
            }

            if subcategories.iter().filter(|s| s.is_catch_all()).count() > 1 {
                return Err(TaxonomyError::MultipleCatchAlls(category_def.id));
            }

            categories.push(Category {
                id: category_def.id,
                name: category_def.name,
                icon: category_def.icon,
                subcategories,
            });
        }

        let taxonomy = Taxonomy {
            categories,
            fallback: definition.fallback,
        };

        let fallback_is_catch_all = taxonomy
            .find(&taxonomy.fallback)
            .map(|(_, sub)| sub.is_catch_all());
        match fallback_is_catch_all {
            None => return Err(TaxonomyError::UnknownFallback(taxonomy.fallback)),
            Some(false) => return Err(TaxonomyError::FallbackNotCatchAll(taxonomy.fallback)),
            Some(true) => {}
        }

        debug!(
            "Loaded taxonomy: {} categories, {} subcategories, fallback `{}`",
            taxonomy.categories.len(),
            taxonomy.subcategory_count(),
            taxonomy.fallback
        );

        Ok(taxonomy)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn fallback_id(&self) -> &str {
        &self.fallback
    }

    pub fn subcategory_count(&self) -> usize {
        self.categories.iter().map(|c| c.subcategories.len()).sum()
    }

    /// Every (category, subcategory) pair in declaration order.
    pub fn subcategories(&self) -> impl Iterator<Item = (&Category, &Subcategory)> {
        self.categories
            .iter()
            .flat_map(|c| c.subcategories.iter().map(move |s| (c, s)))
    }

    pub fn find(&self, subcategory_id: &str) -> Option<(&Category, &Subcategory)> {
        self.subcategories().find(|(_, s)| s.id == subcategory_id)
    }
}

fn check_id(id: &str) -> Result<(), TaxonomyError> {
    if ID_FORMAT.is_match(id) {
        Ok(())
    } else {
        Err(TaxonomyError::InvalidId(id.to_string()))
    }
}

fn compile_subcategory(def: SubcategoryDefinition) -> Result<Subcategory, TaxonomyError> {
    if def.patterns.is_empty() {
        if def.weight != 0 {
            return Err(TaxonomyError::MissingRules {
                subcategory: def.id,
                weight: def.weight,
            });
        }
        if !def.negative_patterns.is_empty() {
            return Err(TaxonomyError::CatchAllWithExclusions(def.id));
        }
    } else if def.weight == 0 {
        return Err(TaxonomyError::ZeroWeight(def.id));
    }

    let patterns = compile_patterns(&def.id, &def.patterns)?;
    let negative_patterns = compile_patterns(&def.id, &def.negative_patterns)?;

    Ok(Subcategory {
        id: def.id,
        name: def.name,
        patterns,
        negative_patterns,
        weight: def.weight,
    })
}

fn compile_patterns(subcategory: &str, sources: &[String]) -> Result<Vec<Regex>, TaxonomyError> {
    sources
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| TaxonomyError::InvalidPattern {
                    subcategory: subcategory.to_string(),
                    pattern: pattern.clone(),
                    source,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_subcategories(subs: &str) -> String {
        format!(
            r#"{{"categories":[{{"id":"cat","name":"Cat","icon":"*","subcategories":[{subs}]}}]}}"#
        )
    }

    #[test]
    fn bundled_taxonomy_is_valid() {
        let taxonomy = Taxonomy::bundled().unwrap();

        assert_eq!(taxonomy.fallback_id(), "other");
        let (category, other) = taxonomy.find("other").unwrap();
        assert_eq!(category.id, "general");
        assert!(other.is_catch_all());
        assert_eq!(other.weight, 0);

        let (_, gita) = taxonomy.find("bhagavad-gita").unwrap();
        assert_eq!(gita.weight, 10);
        assert!(taxonomy.subcategory_count() > taxonomy.categories().len());
    }

    #[test]
    fn weight_defaults_to_five() {
        let json = with_subcategories(
            r#"{"id":"a","name":"A","patterns":["x"]},{"id":"other","name":"O","weight":0}"#,
        );
        let taxonomy = Taxonomy::from_json(&json).unwrap();
        assert_eq!(taxonomy.find("a").unwrap().1.weight, 5);
    }

    #[test]
    fn ruleless_subcategory_with_weight_is_rejected() {
        let json = with_subcategories(
            r#"{"id":"a","name":"A"},{"id":"other","name":"O","weight":0}"#,
        );
        let err = Taxonomy::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            TaxonomyError::MissingRules { ref subcategory, weight: 5 } if subcategory == "a"
        ));
    }

    #[test]
    fn ruled_subcategory_with_zero_weight_is_rejected() {
        let json = with_subcategories(
            r#"{"id":"a","name":"A","patterns":["x"],"weight":0},{"id":"other","name":"O","weight":0}"#,
        );
        assert!(matches!(
            Taxonomy::from_json(&json).unwrap_err(),
            TaxonomyError::ZeroWeight(_)
        ));
    }

    #[test]
    fn bad_regex_is_reported_with_its_subcategory() {
        let json = with_subcategories(
            r#"{"id":"a","name":"A","patterns":["(unclosed"]},{"id":"other","name":"O","weight":0}"#,
        );
        match Taxonomy::from_json(&json).unwrap_err() {
            TaxonomyError::InvalidPattern { subcategory, pattern, .. } => {
                assert_eq!(subcategory, "a");
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn subcategory_ids_are_unique_across_categories() {
        let json = r#"{"categories":[
            {"id":"one","name":"One","subcategories":[{"id":"a","name":"A","patterns":["x"]}]},
            {"id":"two","name":"Two","subcategories":[
                {"id":"a","name":"A","patterns":["y"]},
                {"id":"other","name":"O","weight":0}]}]}"#;
        assert!(matches!(
            Taxonomy::from_json(json).unwrap_err(),
            TaxonomyError::DuplicateSubcategory(id) if id == "a"
        ));
    }

    #[test]
    fn fallback_must_exist_and_be_catch_all() {
        let json = with_subcategories(r#"{"id":"a","name":"A","patterns":["x"]}"#);
        assert!(matches!(
            Taxonomy::from_json(&json).unwrap_err(),
            TaxonomyError::UnknownFallback(_)
        ));

        let json = format!(
            r#"{{"fallback":"a",{}"#,
            &with_subcategories(r#"{"id":"a","name":"A","patterns":["x"]}"#)[1..]
        );
        assert!(matches!(
            Taxonomy::from_json(&json).unwrap_err(),
            TaxonomyError::FallbackNotCatchAll(_)
        ));
    }

    #[test]
    fn one_catch_all_per_category() {
        let json = with_subcategories(
            r#"{"id":"misc","name":"M","weight":0},{"id":"other","name":"O","weight":0}"#,
        );
        assert!(matches!(
            Taxonomy::from_json(&json).unwrap_err(),
            TaxonomyError::MultipleCatchAlls(_)
        ));
    }

    #[test]
    fn ids_must_be_file_name_safe() {
        let json = with_subcategories(
            r#"{"id":"../etc","name":"A","patterns":["x"]},{"id":"other","name":"O","weight":0}"#,
        );
        assert!(matches!(
            Taxonomy::from_json(&json).unwrap_err(),
            TaxonomyError::InvalidId(_)
        ));
    }
}
