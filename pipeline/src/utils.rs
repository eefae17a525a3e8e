use chrono::{DateTime, NaiveDate};
use log::warn;
use std::cmp::Ordering;

pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Reduce an ISO8601 timestamp to its calendar day (`YYYY-MM-DD`).
///
/// The day is read as written in the timestamp, without converting to UTC,
/// so `2024-05-01T23:30:00-05:00` stays on the first of May.
pub fn parse_iso8601_to_day(date_str: &str) -> String {
    if date_str.is_empty() {
        return String::new();
    }

    if let Some(prefix) = date_str.get(..10) {
        if let Ok(day) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return day.format("%Y-%m-%d").to_string();
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(date_str) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }

    warn!("Unparseable publish date {date_str:?}, leaving it blank");
    String::new()
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

pub fn youtube_thumbnail_url(video_id: &str) -> String {
    format!("https://i.ytimg.com/vi/{video_id}/mqdefault.jpg")
}

/// Newest first. Day strings compare lexically, which matches their
/// chronological order.
pub fn compare_published_desc(a: &str, b: &str) -> Ordering {
    b.cmp(a)
}
