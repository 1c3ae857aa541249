// Cross-cutting prompt fragments shared by the generation and judging
// modules. Stage-specific templates live next to their stage.

/// Appended to every system prompt that expects structured output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies outside the JSON fields.";

/// Joins a topic set into the canonical prompt form: quoted, comma-separated.
pub fn format_topics(topics: &[String]) -> String {
    topics
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_topics_quotes_and_joins() {
        let topics = vec!["cats".to_string(), "tax season".to_string()];
        assert_eq!(format_topics(&topics), "\"cats\", \"tax season\"");
    }
}
