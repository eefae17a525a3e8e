//! Synthetic catalog for working on the site without API access.

use crate::models::RawVideo;
use chrono::{Duration, NaiveDate};

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";
const ID_LEN: usize = 11;
const VARIATIONS: [&str; 3] = ["Part 1", "Part 2", "Part 3"];
const VARIED_SEEDS: usize = 40;

const SEEDS: &[(&str, &str)] = &[
    ("Bhagavad Gita Chapter 1 - Arjuna Vishada Yoga", "Arjuna's dilemma on the battlefield of Kurukshetra."),
    ("Bhagavad Gita Chapter 2 - Sankhya Yoga", "Krishna explains the eternal nature of the soul."),
    ("Bhagavad Gita Chapter 3 - Karma Yoga", "The path of selfless action and duty."),
    ("Bhagavad Gita Chapter 12 - Bhakti Yoga", "Devotional service to the supreme Lord."),
    ("Ramayana - Bala Kanda Part 1", "The birth of Lord Rama and his childhood in Ayodhya."),
    ("Ramayana - Ayodhya Kanda Part 1", "The preparations for Rama's coronation and the exile."),
    ("Ramayana - Sundara Kanda Part 1", "Hanuman's journey to Lanka to find Sita."),
    ("Ramayana - Yuddha Kanda Part 1", "The great battle between Rama and Ravana begins."),
    ("Mahabharata - Sabha Parva - The Dice Game", "The fateful dice game between Pandavas and Kauravas."),
    ("Mahabharata - Karna's Story", "The tragic hero Karna and his unwavering loyalty."),
    ("Mahabharata - Abhimanyu and the Chakravyuha", "A heroic stand against impossible odds."),
    ("Isha Upanishad - Complete Commentary", "Verse by verse analysis of the Isha Upanishad."),
    ("Katha Upanishad - Nachiketa's Journey", "The dialogue between Nachiketa and Yama."),
    ("Rig Veda - Nasadiya Sukta", "The famous hymn of creation."),
    ("Vedic Chanting - Sri Rudram Chamakam", "Complete chanting of Sri Rudram with meaning."),
    ("Srimad Bhagavatam - Krishna Leela Part 1", "The divine pastimes of Lord Krishna from Bhagavata Purana."),
    ("Vishnu Purana - Creation of the Universe", "Cosmology according to Vishnu Purana."),
    ("Shiva Purana - The Wedding of Shiva and Parvati", "The auspicious marriage of Lord Shiva."),
    ("Devi Bhagavata - Glory of the Divine Mother", "The supreme power of Shakti."),
    ("Garuda Purana - After Death Journey", "What happens after death."),
    ("Vishnu Sahasranamam - Complete with Meaning", "The thousand names of Lord Vishnu explained."),
    ("Lalitha Sahasranamam - Names of the Divine Mother", "The thousand names of Goddess Lalitha."),
    ("Hanuman Chalisa - Meaning and Significance", "The 40 verses dedicated to Lord Hanuman."),
    ("Kanakadhara Stotram - The Golden Rain", "A prayer to Goddess Lakshmi."),
    ("Advaita Vedanta - Introduction to Non-Duality", "The philosophy of Advaita."),
    ("Vivekachudamani - The Crest Jewel of Discrimination", "A masterwork on self-knowledge."),
    ("Ramanuja's Vishishtadvaita Philosophy", "Qualified non-dualism explained."),
    ("Brahma Sutra - Vedanta Philosophy", "The aphorisms of Brahman explained systematically."),
    ("Patanjali Yoga Sutra - Chapter 1", "The first chapter on the contemplation of consciousness."),
    ("Pranayama Techniques for Beginners", "Basic breathing exercises from the yoga tradition."),
    ("Meditation Techniques", "Practical meditation methods from the yogic tradition."),
    ("Significance of Navaratri - Nine Nights of Worship", "The spiritual significance of the festival."),
    ("Sandhyavandana - Daily Ritual Practice", "Worship performed at dawn and dusk."),
    ("Ekadashi Vrata - Spiritual Significance", "Why observing the fast is beneficial."),
    ("Annamacharya Keerthana Collection", "Devotional songs by Annamacharya."),
    ("Devotional Bhajan - Om Namah Shivaya", "Melodious bhajan dedicated to Lord Shiva."),
    ("Sanskrit Subhashitam - Wisdom Verses", "Sanskrit wisdom verses with meaning."),
    ("Kalidasa - Meghadutam Part 1", "The Cloud Messenger by the great poet."),
    ("Spiritual Discourse - The Purpose of Human Life", "A pravachanam on the purpose of human existence."),
    ("Questions and Answers with Devotees", "An informal session."),
    ("రామాయణం - బాలకాండ - Telugu Ramayana", "శ్రీరాముడి జన్మ వృత్తాంతం. The birth story of Lord Rama in Telugu."),
    ("భగవద్గీత - అధ్యాయం 1 - Bhagavad Gita in Telugu", "భగవద్గీత మొదటి అధ్యాయం. First chapter of Bhagavad Gita in Telugu."),
    ("మహాభారతం - కర్ణుడి కథ - Mahabharata in Telugu", "మహాభారతంలో కర్ణుడి గాథ. The story of Karna in Telugu."),
    ("పురాణాలు - భాగవతం - Bhagavatam in Telugu", "శ్రీమద్ భాగవతం తెలుగులో. Srimad Bhagavatam Telugu discourse."),
    ("హనుమాన్ చాలీసా - Hanuman Chalisa Telugu Meaning", "హనుమాన్ చాలీసా అర్థం. Hanuman Chalisa with Telugu explanation."),
    ("నవరాత్రుల ప్రాముఖ్యం - Navaratri in Telugu", "నవరాత్రుల విశేషత. Significance of Navaratri in Telugu."),
];

/// Stable 11-character id in the YouTube id alphabet.
fn sample_video_id(index: usize) -> String {
    // Knuth multiplicative hash, spread over the 64-symbol alphabet
    let mut n = (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    (0..ID_LEN)
        .map(|_| {
            let symbol = ID_ALPHABET[(n & 63) as usize] as char;
            n = n.rotate_right(6);
            symbol
        })
        .collect()
}

fn sample_published_at(index: usize) -> String {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let day = base + Duration::days((index as i64 * 7) / 2);
    format!("{}T00:00:00.000Z", day.format("%Y-%m-%d"))
}

pub fn sample_raw_videos() -> Vec<RawVideo> {
    let mut videos = Vec::new();

    let mut push = |title: String, description: String| {
        let index = videos.len();
        videos.push(RawVideo {
            video_id: sample_video_id(index),
            title,
            description,
            published_at: sample_published_at(index),
            thumbnail: String::new(),
        });
    };

    for (title, description) in SEEDS {
        push(title.to_string(), description.to_string());
    }
    for (title, description) in SEEDS.iter().take(VARIED_SEEDS) {
        for variation in VARIATIONS {
            push(
                format!("{title} - {variation}"),
                format!("{description} {variation} continuation."),
            );
        }
    }

    videos
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_corpus_is_deterministic_with_unique_ids() {
        let first = sample_raw_videos();
        assert_eq!(first, sample_raw_videos());
        assert_eq!(first.len(), SEEDS.len() + VARIED_SEEDS * VARIATIONS.len());

        let ids: HashSet<&str> = first.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids.len(), first.len());
        assert!(first.iter().all(|v| v.video_id.len() == ID_LEN));
    }

    #[test]
    fn dates_advance_three_and_a_half_days() {
        assert_eq!(sample_published_at(0), "2024-01-01T00:00:00.000Z");
        assert_eq!(sample_published_at(1), "2024-01-04T00:00:00.000Z");
        assert_eq!(sample_published_at(2), "2024-01-08T00:00:00.000Z");
    }
}
