//! Admissibility gates: five liberal checks, run concurrently.
//!
//! A gate that fails after the client's retries passes by default with the
//! failure recorded in its reasoning: flaky infrastructure must not disqualify
//! a joke, only the model's judgment may.

use tracing::warn;

use crate::judges::models::{AdmissibilityCheck, AdmissibilityReport};
use crate::judges::prompts::{
    ACCESSIBILITY_INSTRUCTIONS, ADMISSIBILITY_PROMPT_TEMPLATE, ADMISSIBILITY_SYSTEM,
    APPROPRIATENESS_INSTRUCTIONS, COHERENCE_INSTRUCTIONS, COMPLETENESS_INSTRUCTIONS,
    INTENT_INSTRUCTIONS,
};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::LlmClient;

pub async fn check_admissibility(llm: &LlmClient, joke_text: &str) -> AdmissibilityReport {
    let (intent, completeness, appropriateness, coherence, accessibility) = tokio::join!(
        run_gate(llm, joke_text, "intent", INTENT_INSTRUCTIONS),
        run_gate(llm, joke_text, "completeness", COMPLETENESS_INSTRUCTIONS),
        run_gate(llm, joke_text, "appropriateness", APPROPRIATENESS_INSTRUCTIONS),
        run_gate(llm, joke_text, "coherence", COHERENCE_INSTRUCTIONS),
        run_gate(llm, joke_text, "accessibility", ACCESSIBILITY_INSTRUCTIONS),
    );

    AdmissibilityReport {
        intent,
        completeness,
        appropriateness,
        coherence,
        accessibility,
    }
}

async fn run_gate(
    llm: &LlmClient,
    joke_text: &str,
    check_type: &str,
    instructions: &str,
) -> AdmissibilityCheck {
    let prompt = ADMISSIBILITY_PROMPT_TEMPLATE
        .replace("{check_type}", check_type)
        .replace("{instructions}", instructions)
        .replace("{joke}", joke_text);
    let system = format!("{ADMISSIBILITY_SYSTEM} {JSON_ONLY_INSTRUCTION}");

    match llm.call_json::<AdmissibilityCheck>(&prompt, &system).await {
        Ok(check) => check,
        Err(e) => {
            warn!(check_type, "admissibility gate failed, passing by default: {e}");
            AdmissibilityCheck {
                passed: true,
                reasoning: format!("Check unavailable ({e}); passed by liberal default"),
            }
        }
    }
}
