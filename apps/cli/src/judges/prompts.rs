// Prompt constants for the rating phase: admissibility gates, category
// assignment, factor selection and factor scoring.

/// System prompt shared by all admissibility gates.
pub const ADMISSIBILITY_SYSTEM: &str = "You are a liberal comedy admissibility checker. \
    Your default is to PASS; reject only clear violations of the specific check you are given.";

/// Admissibility template. Replace `{check_type}`, `{instructions}`, `{joke}`.
pub const ADMISSIBILITY_PROMPT_TEMPLATE: &str = r#"Run the "{check_type}" admissibility check on the joke below.

{instructions}

Return a JSON object with this EXACT schema:
{
  "passed": true,
  "reasoning": "one sentence"
}

JOKE:
{joke}"#;

/// Per-gate liberal instructions. The gate only rejects extremes.
pub const INTENT_INSTRUCTIONS: &str = "Only reject if there is ABSOLUTELY NO comedic intent. \
    Any attempt at humor, wordplay, irony, or comedic structure passes, even if it fails.";

pub const COMPLETENESS_INSTRUCTIONS: &str = "Only reject if SEVERELY incomplete. \
    A setup with any form of conclusion passes; one-liners and puns pass.";

pub const APPROPRIATENESS_INSTRUCTIONS: &str = "Only reject EXTREMELY offensive content. \
    Edgy, dark, adult and political humor pass; reject only content promoting hate, violence or extreme harm.";

pub const COHERENCE_INSTRUCTIONS: &str = "Only reject if COMPLETELY incoherent. \
    Any logical thread passes, including absurd or surreal humor and intentional non-sequiturs.";

pub const ACCESSIBILITY_INSTRUCTIONS: &str = "Only reject if IMPOSSIBLE to understand. \
    Specialized, cultural, technical or niche humor passes.";

/// System prompt for category assignment.
pub const CATEGORY_SYSTEM: &str = "You classify jokes into comedy categories.";

/// Category template. Replace `{categories}`, `{joke}`.
pub const CATEGORY_PROMPT_TEMPLATE: &str = r#"Assign the joke below to the categories it genuinely fits.

Available categories: {categories}

Return a JSON object with this EXACT schema:
{
  "categories": ["Wordplay"],
  "is_independent": false
}

Rules:
- Use only names from the available list, spelled exactly.
- If the joke fits none of them, return an empty list and set "is_independent" to true.

JOKE:
{joke}"#;

/// System prompt for factor selection.
pub const FACTOR_SELECT_SYSTEM: &str = "You select which evaluation factors genuinely apply to a joke.";

/// Factor selection template. Replace `{category}`, `{factors}`, `{joke}`.
pub const FACTOR_SELECT_PROMPT_TEMPLATE: &str = r#"From the "{category}" factors below, select the ones that genuinely apply to the joke.

Available factors:
{factors}

Return a JSON object with this EXACT schema:
{
  "relevant_factors": ["pun_quality"]
}

Select only factors whose dimension the joke actually engages; an empty list is valid.

JOKE:
{joke}"#;

/// System prompt for factor scoring.
pub const FACTOR_SCORE_SYSTEM: &str = "You score one joke on one factor, from 0 (absent or botched) to 5 (executed superbly).";

/// Factor scoring template. Replace `{factor_name}`, `{factor_description}`,
/// `{positive_examples}`, `{negative_examples}`, `{joke}`.
pub const FACTOR_SCORE_PROMPT_TEMPLATE: &str = r#"Score the joke below on the factor "{factor_name}": {factor_description}

High-scoring examples:
{positive_examples}

Low-scoring examples:
{negative_examples}

Return a JSON object with this EXACT schema:
{
  "score": 3
}

"score" must be an integer from 0 to 5.

JOKE:
{joke}"#;
