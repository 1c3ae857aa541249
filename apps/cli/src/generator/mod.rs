//! Generation phase: turns a topic set into a pool of candidate jokes.
//!
//! Flow: topics → seed triplets → (optional) higher-order groups → jokes.

pub mod grouping;
pub mod jokes;
pub mod models;
pub mod prompts;
pub mod seeds;
pub mod topics;

use tracing::info;

use crate::errors::AppError;
use crate::generator::models::GenerationArtifacts;
use crate::llm_client::LlmClient;

/// Runs the full generation pipeline for the given topics.
///
/// `first_order_only` skips the grouping stage; jokes then come from
/// individual seeds only.
pub async fn run_generation(
    llm: &LlmClient,
    topics: Vec<String>,
    first_order_only: bool,
) -> Result<GenerationArtifacts, AppError> {
    info!(topics = %topics.join(", "), "generation starting");

    let seeds = seeds::generate_seed_triplets(llm, &topics).await?;

    let groups = if first_order_only {
        Vec::new()
    } else {
        grouping::build_groups(llm, &topics, &seeds).await
    };

    let jokes = jokes::generate_full_joke_set(llm, &topics, &seeds, &groups).await;
    if jokes.is_empty() {
        return Err(AppError::InvalidInput(
            "generation produced no jokes".to_string(),
        ));
    }

    Ok(GenerationArtifacts {
        topics,
        seeds,
        groups,
        jokes,
    })
}
