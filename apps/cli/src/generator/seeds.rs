//! Stage 1: seed triplet generation.

use tracing::info;

use crate::errors::AppError;
use crate::generator::models::SeedTriplet;
use crate::generator::prompts::{SEED_PROMPT_TEMPLATE, SEED_SYSTEM};
use crate::llm_client::prompts::{format_topics, JSON_ONLY_INSTRUCTION};
use crate::llm_client::LlmClient;

/// Generates the hook-template-explanation triplets for the topic set.
///
/// This stage is the root of the whole pipeline: the client's retries are the
/// only recovery, and an empty result is an error rather than a degrade.
pub async fn generate_seed_triplets(
    llm: &LlmClient,
    topics: &[String],
) -> Result<Vec<SeedTriplet>, AppError> {
    let prompt = SEED_PROMPT_TEMPLATE.replace("{topics}", &format_topics(topics));
    let system = format!("{SEED_SYSTEM} {JSON_ONLY_INSTRUCTION}");

    let seeds: Vec<SeedTriplet> = llm.call_json(&prompt, &system).await?;
    if seeds.is_empty() {
        return Err(AppError::InvalidInput(
            "seed generation returned no triplets".to_string(),
        ));
    }

    info!(count = seeds.len(), "seed triplets generated");
    Ok(seeds)
}
