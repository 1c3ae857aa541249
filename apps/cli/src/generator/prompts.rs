// Prompt constants for the three generation stages: seed triplets,
// higher-order grouping, and joke writing.

/// System prompt for seed-triplet generation.
pub const SEED_SYSTEM: &str = "You are a comedy writer's assistant generating raw material: \
    comedic hooks paired with joke templates and a strategy for using them together.";

/// Seed generation template. Replace `{topics}`.
pub const SEED_PROMPT_TEMPLATE: &str = r#"Generate 15-20 diverse hook-template-explanation triplets for jokes about: {topics}

Requirements:
- HOOK: a comedic anchor tied to the topic (wordplay, a conceptual connection, a cultural reference, or a semantic relationship). Each hook takes a distinct angle.
- TEMPLATE: a compatible joke structure ("Why did...", "What do you call...", setup-punchline, comparison, short narrative). Vary the formats.
- EXPLANATION: why the pair works, which comedic techniques it enables (misdirection, wordplay, absurdity), and several concrete ways to build different jokes from it.

Return a JSON array with this EXACT schema:
[
  {
    "hook": "...",
    "template": "...",
    "explanation": "..."
  }
]

Generate AT LEAST 15 triplets."#;

/// System prompt for higher-order grouping.
pub const GROUPING_SYSTEM: &str = "You combine comedic seeds into groups that enable layered, \
    multi-element jokes.";

/// Grouping template. Replace `{topics}`, `{seeds}`.
pub const GROUPING_PROMPT_TEMPLATE: &str = r#"Topic(s): {topics}

Here are the available hook-template seeds, numbered from 0:
{seeds}

Combine 2-4 seeds per group where the combination genuinely enables layered humor, complex wordplay, or conceptual connections that the seeds cannot reach alone. Create AT LEAST ONE group; create more only for real synergy.

Return a JSON array with this EXACT schema:
[
  {
    "indices": [0, 3],
    "explanation": "how these seeds connect, contrast or sequence into sophisticated jokes"
  }
]

"indices" are zero-based positions into the seed list above, at least 2 per group."#;

/// System prompt for joke writing.
pub const JOKE_SYSTEM: &str = "You are a comedy writer producing original, genuinely funny jokes. \
    Strong unexpected punchlines, setups that do not telegraph, concise delivery.";

/// Joke generation template for a single seed. Replace `{topics}`, `{seed}`.
pub const JOKE_FROM_SEED_PROMPT_TEMPLATE: &str = r#"Topic(s): {topics}

Write 1-3 original jokes using this seed as INSPIRATION, not a rigid formula:
{seed}

Rules:
- Completely new jokes, not the examples from the explanation.
- Adapt the template creatively; extend or twist the hook freely.
- Each joke must stand alone and read naturally.

Return a JSON array with this EXACT schema:
[
  { "text": "the joke" }
]"#;

/// Joke generation template for a seed group. Replace `{topics}`, `{group}`.
pub const JOKE_FROM_GROUP_PROMPT_TEMPLATE: &str = r#"Topic(s): {topics}

Write 2-5 sophisticated, multi-layered jokes using this group of seeds together:
{group}

Rules:
- Each joke draws on MULTIPLE elements of the group: combined hooks, sequenced or nested templates, callbacks, escalation.
- Keep a clear through-line despite the complexity.
- Each joke must stand alone as genuinely funny.

Return a JSON array with this EXACT schema:
[
  { "text": "the joke" }
]"#;
