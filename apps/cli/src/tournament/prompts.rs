// Prompt constants for the pairwise duel comparison.

/// System prompt for duel comparison.
pub const DUEL_SYSTEM: &str = "You are an expert comedy judge comparing two jokes head-to-head. \
    Judge only which joke is funnier; ignore length and topic.";

/// Duel prompt template. Replace `{joke_a}`, `{joke_b}`, `{good_examples}`,
/// `{bad_examples}` before sending.
pub const DUEL_PROMPT_TEMPLATE: &str = r#"Compare the two jokes below and decide which one is funnier.

Calibrate your judgment with these reference examples:
{good_examples}
{bad_examples}

Return a JSON object with this EXACT schema (no extra fields):
{
  "winner": "a",
  "confidence": 3.5,
  "reasoning": "one or two sentences explaining the call"
}

Rules:
- "winner" must be exactly "a" or "b".
- "confidence" is a number from 1.0 (coin flip) to 5.0 (clearly funnier).
- Judge the jokes on their own merits; position in this prompt carries no meaning.

JOKE A:
{joke_a}

JOKE B:
{joke_b}"#;
