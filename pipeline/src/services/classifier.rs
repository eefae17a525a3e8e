use crate::models::RawVideo;
use crate::taxonomy::Taxonomy;

/// Where a video is filed. `secondary` is always in a different category
/// than `primary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub primary: String,
    pub secondary: Option<String>,
}

#[derive(Debug)]
struct Candidate<'a> {
    category_id: &'a str,
    subcategory_id: &'a str,
    score: u64,
}

/// Score every ruled subcategory against the video text and pick the best.
///
/// A subcategory whose exclusion rule matches is out regardless of its
/// positive matches. Equal scores keep taxonomy declaration order. Falls
/// back to the taxonomy's catch-all when nothing matches.
pub fn classify_video(video: &RawVideo, taxonomy: &Taxonomy) -> Classification {
    let probe = format!("{} {}", video.title, video.description).to_lowercase();

    let mut candidates: Vec<Candidate> = Vec::new();
    for (category, sub) in taxonomy.subcategories() {
        if sub.is_catch_all() {
            continue;
        }

        if sub.negative_patterns.iter().any(|np| np.is_match(&probe)) {
            continue;
        }

        let match_count = sub.patterns.iter().filter(|p| p.is_match(&probe)).count() as u64;
        if match_count > 0 {
            candidates.push(Candidate {
                category_id: &category.id,
                subcategory_id: &sub.id,
                // u64 holds any pattern count times a u32 weight
                score: match_count * u64::from(sub.weight),
            });
        }
    }

    if candidates.is_empty() {
        return Classification {
            primary: taxonomy.fallback_id().to_string(),
            secondary: None,
        };
    }

    // Stable: ties keep declaration order
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    let primary = &candidates[0];
    let secondary = candidates
        .get(1)
        .filter(|second| second.category_id != primary.category_id)
        .map(|second| second.subcategory_id.to_string());

    Classification {
        primary: primary.subcategory_id.to_string(),
        secondary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(title: &str, description: &str) -> RawVideo {
        RawVideo {
            video_id: "vid00000001".to_string(),
            title: title.to_string(),
            description: description.to_string(),
            published_at: "2024-01-01T00:00:00Z".to_string(),
            thumbnail: String::new(),
        }
    }

    fn bundled() -> Taxonomy {
        Taxonomy::bundled().unwrap()
    }

    const SMALL: &str = r#"{
        "fallback": "misc",
        "categories": [
            {"id": "epics", "name": "Epics", "icon": "E", "subcategories": [
                {"id": "alpha", "name": "Alpha", "weight": 3, "patterns": ["\\balpha\\b", "\\bfirst\\b"]},
                {"id": "beta", "name": "Beta", "weight": 6, "patterns": ["\\bbeta\\b"], "negativePatterns": ["\\bgamma\\b"]}
            ]},
            {"id": "hymns", "name": "Hymns", "icon": "H", "subcategories": [
                {"id": "gamma", "name": "Gamma", "weight": 6, "patterns": ["\\bgamma\\b"]},
                {"id": "misc", "name": "Misc", "weight": 0}
            ]}
        ]
    }"#;

    fn small() -> Taxonomy {
        Taxonomy::from_json(SMALL).unwrap()
    }

    #[test]
    fn no_match_falls_back_to_catch_all() {
        let result = classify_video(&video("Morning walk", "nothing here"), &small());
        assert_eq!(result.primary, "misc");
        assert_eq!(result.secondary, None);

        let result = classify_video(&video("", ""), &bundled());
        assert_eq!(result.primary, "other");
        assert_eq!(result.secondary, None);
    }

    #[test]
    fn score_is_match_count_times_weight() {
        // alpha: 2 matches * 3 = 6, gamma: 1 * 6 = 6 -> tie keeps declaration order
        let result = classify_video(&video("Alpha, the first", "gamma"), &small());
        assert_eq!(result.primary, "alpha");
        assert_eq!(result.secondary.as_deref(), Some("gamma"));
    }

    #[test]
    fn exclusion_beats_a_higher_positive_score() {
        // beta alone would score 6 and win over alpha's 3
        let result = classify_video(&video("beta alpha", "with gamma"), &small());
        assert_eq!(result.primary, "gamma");
        assert_eq!(result.secondary.as_deref(), Some("alpha"));
    }

    #[test]
    fn large_weights_do_not_overflow_the_score() {
        let taxonomy = Taxonomy::from_json(
            r#"{"fallback": "misc", "categories": [
                {"id": "one", "name": "One", "subcategories": [
                    {"id": "heavy", "name": "Heavy", "weight": 4000000000, "patterns": ["x", "y", "z"]},
                    {"id": "misc", "name": "Misc", "weight": 0}
                ]},
                {"id": "two", "name": "Two", "subcategories": [
                    {"id": "light", "name": "Light", "weight": 4294967295, "patterns": ["x"]}
                ]}
            ]}"#,
        )
        .unwrap();

        let result = classify_video(&video("x y z", ""), &taxonomy);
        assert_eq!(result.primary, "heavy");
        assert_eq!(result.secondary.as_deref(), Some("light"));
    }

    #[test]
    fn second_best_in_same_category_is_dropped() {
        let result = classify_video(&video("beta alpha", ""), &small());
        assert_eq!(result.primary, "beta");
        assert_eq!(result.secondary, None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let result = classify_video(&video("BETA", ""), &small());
        assert_eq!(result.primary, "beta");
    }

    #[test]
    fn gita_chapter_lands_in_bhagavad_gita() {
        let taxonomy = bundled();
        let result = classify_video(
            &video("Bhagavad Gita Chapter 2", "Krishna explains the soul"),
            &taxonomy,
        );
        assert_eq!(result.primary, "bhagavad-gita");
        assert_eq!(result.secondary, None);
    }

    #[test]
    fn telugu_ramayana_title_lands_in_ramayana() {
        let result = classify_video(&video("రామాయణం - బాలకాండ", ""), &bundled());
        assert_eq!(result.primary, "ramayana");
    }

    #[test]
    fn mahabharata_mention_excludes_ramayana() {
        let taxonomy = bundled();
        let result = classify_video(
            &video("Ramayana references in the Mahabharata", ""),
            &taxonomy,
        );
        assert_eq!(result.primary, "mahabharata");
        assert_ne!(result.secondary.as_deref(), Some("ramayana"));

        // The exclusion only runs one way
        let result = classify_video(&video("Mahabharata", "Valmiki Ramayana"), &taxonomy);
        assert_eq!(result.primary, "mahabharata");
    }

    #[test]
    fn secondary_comes_from_another_category() {
        let taxonomy = bundled();
        let result = classify_video(
            &video("Vedic Chanting - Sri Rudram Chamakam", "Complete chanting"),
            &taxonomy,
        );
        assert_eq!(result.primary, "sri-rudram");
        assert_eq!(result.secondary.as_deref(), Some("vedas"));

        let (primary_cat, _) = taxonomy.find(&result.primary).unwrap();
        let (secondary_cat, _) = taxonomy.find(result.secondary.as_deref().unwrap()).unwrap();
        assert_ne!(primary_cat.id, secondary_cat.id);
    }
}
