//! Comparator oracle: the external judge that declares a pairwise winner.
//!
//! The tournament core only sees the `ComparatorOracle` trait; the production
//! implementation calls the LLM, tests script outcomes directly.

use async_trait::async_trait;

use crate::judges::rubric::Rubric;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError};
use crate::tournament::models::ComparisonOutcome;
use crate::tournament::prompts::{DUEL_PROMPT_TEMPLATE, DUEL_SYSTEM};

/// Declares a winner between two texts with a strength-of-preference score.
///
/// `confidence` is a 1.0–5.0 scale where the low end represents near-ties;
/// out-of-range values from an implementation are clamped by the caller.
/// Implementations own their retry policy; an `Err` means retries are
/// exhausted and the caller should degrade.
#[async_trait]
pub trait ComparatorOracle: Send + Sync {
    async fn compare(&self, text_a: &str, text_b: &str) -> Result<ComparisonOutcome, LlmError>;
}

/// Production comparator: one LLM call per direction, primed with the
/// rubric's good/bad joke examples.
pub struct LlmComparator {
    llm: LlmClient,
    good_examples: String,
    bad_examples: String,
}

impl LlmComparator {
    pub fn new(llm: LlmClient, rubric: &Rubric) -> Self {
        let good_examples = rubric
            .good_examples
            .iter()
            .map(|ex| format!("Good: {ex}"))
            .collect::<Vec<_>>()
            .join("\n");
        let bad_examples = rubric
            .bad_examples
            .iter()
            .map(|ex| format!("Bad: {ex}"))
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            llm,
            good_examples,
            bad_examples,
        }
    }
}

#[async_trait]
impl ComparatorOracle for LlmComparator {
    async fn compare(&self, text_a: &str, text_b: &str) -> Result<ComparisonOutcome, LlmError> {
        let prompt = DUEL_PROMPT_TEMPLATE
            .replace("{joke_a}", text_a)
            .replace("{joke_b}", text_b)
            .replace("{good_examples}", &self.good_examples)
            .replace("{bad_examples}", &self.bad_examples);
        let system = format!("{DUEL_SYSTEM} {JSON_ONLY_INSTRUCTION}");

        self.llm.call_json::<ComparisonOutcome>(&prompt, &system).await
    }
}
