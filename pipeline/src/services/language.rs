use crate::models::Language;
use lazy_static::lazy_static;
use regex::Regex;

/// Telugu Unicode block, U+0C00..=U+0C7F
const TELUGU_BLOCK: std::ops::RangeInclusive<char> = '\u{0C00}'..='\u{0C7F}';

const TELUGU_RATIO: f64 = 0.30;
const MIXED_RATIO: f64 = 0.05;

lazy_static! {
    static ref TELUGU_KEYWORD: Regex = Regex::new(r"\btelugu\b").unwrap();
    static ref ENGLISH_KEYWORD: Regex = Regex::new(r"\b(english|hindi)\b").unwrap();
}

/// Tag a video's language from the share of Telugu script in its text.
///
/// Script ratio decides first. Only text with (almost) no Telugu script
/// falls through to the title keywords.
pub fn detect_language(title: &str, description: &str) -> Language {
    let mut total = 0usize;
    let mut telugu = 0usize;
    for ch in title.chars().chain(description.chars()) {
        if ch.is_whitespace() {
            continue;
        }
        total += 1;
        if TELUGU_BLOCK.contains(&ch) {
            telugu += 1;
        }
    }

    if total == 0 {
        return Language::English;
    }

    let ratio = telugu as f64 / total as f64;
    if ratio > TELUGU_RATIO {
        return Language::Telugu;
    }
    if ratio > MIXED_RATIO {
        return Language::Mixed;
    }

    let title = title.to_lowercase();
    if TELUGU_KEYWORD.is_match(&title) {
        return Language::Telugu;
    }
    if ENGLISH_KEYWORD.is_match(&title) {
        return Language::English;
    }

    Language::English
}
