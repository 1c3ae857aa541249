//! Stage 3: joke generation, fanned out across all seeds and groups.
//!
//! Each seed and each group gets one generation call; calls run concurrently
//! and a failed call only loses that context's jokes. Sequential ids are
//! assigned once the full set is gathered.

use serde::Deserialize;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::generator::models::{GeneratedJoke, SeedGroup, SeedTriplet};
use crate::generator::prompts::{
    JOKE_FROM_GROUP_PROMPT_TEMPLATE, JOKE_FROM_SEED_PROMPT_TEMPLATE, JOKE_SYSTEM,
};
use crate::llm_client::prompts::{format_topics, JSON_ONLY_INSTRUCTION};
use crate::llm_client::LlmClient;

#[derive(Debug, Deserialize)]
struct RawJoke {
    text: String,
}

pub async fn generate_full_joke_set(
    llm: &LlmClient,
    topics: &[String],
    seeds: &[SeedTriplet],
    groups: &[SeedGroup],
) -> Vec<GeneratedJoke> {
    let topics_str = format_topics(topics);
    let system = format!("{JOKE_SYSTEM} {JSON_ONLY_INSTRUCTION}");

    let mut set = JoinSet::new();

    for (idx, seed) in seeds.iter().enumerate() {
        let prompt = JOKE_FROM_SEED_PROMPT_TEMPLATE
            .replace("{topics}", &topics_str)
            .replace("{seed}", &describe_seed(seed));
        let llm = llm.clone();
        let system = system.clone();
        set.spawn(async move { (idx, llm.call_json::<Vec<RawJoke>>(&prompt, &system).await) });
    }
    for (idx, group) in groups.iter().enumerate() {
        let prompt = JOKE_FROM_GROUP_PROMPT_TEMPLATE
            .replace("{topics}", &topics_str)
            .replace("{group}", &describe_group(group));
        let llm = llm.clone();
        let system = system.clone();
        // Group contexts index after the seeds so the collected order is
        // stable: seeds first, groups second.
        let slot = seeds.len() + idx;
        set.spawn(async move { (slot, llm.call_json::<Vec<RawJoke>>(&prompt, &system).await) });
    }

    let mut by_slot: Vec<Vec<RawJoke>> = (0..seeds.len() + groups.len()).map(|_| Vec::new()).collect();
    while let Some(joined) = set.join_next().await {
        let (slot, result) = joined.expect("joke generation task panicked");
        match result {
            Ok(jokes) => by_slot[slot] = jokes,
            Err(e) => warn!(slot, "joke generation failed for one context: {e}"),
        }
    }

    let texts: Vec<String> = by_slot
        .into_iter()
        .flatten()
        .map(|j| j.text)
        .filter(|t| !t.trim().is_empty())
        .collect();

    let jokes = assign_ids(texts);
    info!(count = jokes.len(), "joke generation complete");
    jokes
}

fn describe_seed(seed: &SeedTriplet) -> String {
    format!(
        "Hook: {}\nTemplate: {}\nExplanation: {}",
        seed.hook, seed.template, seed.explanation
    )
}

fn describe_group(group: &SeedGroup) -> String {
    let members = group
        .triplets
        .iter()
        .map(describe_seed)
        .collect::<Vec<_>>()
        .join("\n---\n");
    format!("{members}\n\nGroup strategy: {}", group.explanation)
}

/// Sequential ids starting at 1, in collection order.
fn assign_ids(texts: Vec<String>) -> Vec<GeneratedJoke> {
    texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| GeneratedJoke {
            id: i as u32 + 1,
            text,
        })
        .collect()
}
