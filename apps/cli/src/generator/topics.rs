//! Topic processing: cleans user-supplied topics and falls back to a random
//! one when nothing usable remains.

use rand::seq::SliceRandom;
use tracing::info;

const MAX_TOPIC_LEN: usize = 60;

/// Fallback pool when the user supplies no usable topic.
const RANDOM_TOPICS: &[&str] = &[
    "bananas",
    "airport security",
    "group chats",
    "houseplants",
    "self-checkout machines",
    "astrology",
    "meal prep",
    "video call backgrounds",
    "gym memberships",
    "autocorrect",
];

/// Turns raw CLI input into a cleaned topic set. Empty or fully-rejected
/// input falls back to one random topic.
pub fn process_user_input(input: Option<&str>) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for topic in input.unwrap_or("").split(',').filter_map(clean_topic) {
        if !topics.contains(&topic) {
            topics.push(topic);
        }
    }

    if topics.is_empty() {
        let topic = random_topic();
        info!(topic = %topic, "no usable topic supplied, picked a random one");
        topics.push(topic);
    }
    topics
}

fn random_topic() -> String {
    RANDOM_TOPICS
        .choose(&mut rand::thread_rng())
        .expect("random topic pool is non-empty")
        .to_string()
}

/// Whitelist cleaning: keep letters, digits, spaces, hyphens and apostrophes;
/// collapse whitespace; cap length. Returns `None` when nothing survives.
pub fn clean_topic(raw: &str) -> Option<String> {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '\'')
        .collect();

    let collapsed = filtered.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }

    // Cap in characters, not bytes: the whitelist admits multibyte
    // alphanumerics, so a byte-index truncate could split a char and panic.
    let mut topic: String = collapsed.chars().take(MAX_TOPIC_LEN).collect();
    topic.truncate(topic.trim_end().len());
    Some(topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_topic_strips_punctuation_and_collapses_whitespace() {
        assert_eq!(clean_topic("  cats!!  and   dogs?? "), Some("cats and dogs".to_string()));
    }

    #[test]
    fn test_clean_topic_keeps_hyphens_and_apostrophes() {
        assert_eq!(clean_topic("self-checkout"), Some("self-checkout".to_string()));
        assert_eq!(clean_topic("new year's eve"), Some("new year's eve".to_string()));
    }

    #[test]
    fn test_clean_topic_rejects_pure_punctuation() {
        assert_eq!(clean_topic("!!!???"), None);
        assert_eq!(clean_topic("   "), None);
    }

    #[test]
    fn test_clean_topic_caps_length() {
        let long = "a".repeat(200);
        let cleaned = clean_topic(&long).unwrap();
        assert!(cleaned.chars().count() <= MAX_TOPIC_LEN);
    }

    #[test]
    fn test_clean_topic_caps_multibyte_input_without_panicking() {
        // A byte-index cap would land mid-char here and panic.
        let input = format!("a{}", "é".repeat(40));
        let cleaned = clean_topic(&input).unwrap();
        assert_eq!(cleaned.chars().count(), 41);
        assert!(cleaned.starts_with('a'));
        assert!(cleaned.ends_with('é'));

        let over = "é".repeat(200);
        let capped = clean_topic(&over).unwrap();
        assert_eq!(capped.chars().count(), MAX_TOPIC_LEN);
    }

    #[test]
    fn test_process_splits_on_commas() {
        let topics = process_user_input(Some("cats, dogs , , birds"));
        assert_eq!(topics, vec!["cats", "dogs", "birds"]);
    }

    #[test]
    fn test_process_empty_input_falls_back_to_random() {
        let topics = process_user_input(None);
        assert_eq!(topics.len(), 1);
        assert!(RANDOM_TOPICS.contains(&topics[0].as_str()));
    }

    #[test]
    fn test_process_rejected_input_falls_back_to_random() {
        let topics = process_user_input(Some("***, ???"));
        assert_eq!(topics.len(), 1);
        assert!(RANDOM_TOPICS.contains(&topics[0].as_str()));
    }
}
