//! Stage 2: higher-order grouping of seed triplets.
//!
//! Grouping is best-effort: an LLM failure or unusable output falls back to a
//! default group of the first two seeds, because downstream joke generation
//! expects at least one group when this stage runs at all.

use serde::Deserialize;
use tracing::{info, warn};

use crate::generator::models::{SeedGroup, SeedTriplet};
use crate::generator::prompts::{GROUPING_PROMPT_TEMPLATE, GROUPING_SYSTEM};
use crate::llm_client::prompts::{format_topics, JSON_ONLY_INSTRUCTION};
use crate::llm_client::LlmClient;

/// Group size bounds; indices outside the seed list are dropped.
const MIN_GROUP_SIZE: usize = 2;
const MAX_GROUP_SIZE: usize = 4;

#[derive(Debug, Deserialize)]
struct RawGroup {
    #[serde(default)]
    indices: Vec<usize>,
    #[serde(default)]
    explanation: String,
}

pub async fn build_groups(
    llm: &LlmClient,
    topics: &[String],
    seeds: &[SeedTriplet],
) -> Vec<SeedGroup> {
    if seeds.len() < MIN_GROUP_SIZE {
        return Vec::new();
    }

    let listing = seeds
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "Seed {i}:\nHook: {}\nTemplate: {}\nExplanation: {}",
                s.hook, s.template, s.explanation
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let prompt = GROUPING_PROMPT_TEMPLATE
        .replace("{topics}", &format_topics(topics))
        .replace("{seeds}", &listing);
    let system = format!("{GROUPING_SYSTEM} {JSON_ONLY_INSTRUCTION}");

    let raw: Vec<RawGroup> = match llm.call_json(&prompt, &system).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("grouping failed, using default group: {e}");
            return vec![default_group(seeds)];
        }
    };

    let groups = materialize_groups(&raw, seeds);
    if groups.is_empty() {
        warn!("no valid groups in LLM output, using default group");
        return vec![default_group(seeds)];
    }

    info!(count = groups.len(), "higher-order groups created");
    groups
}

/// Resolves raw index lists against the seed list, dropping out-of-range and
/// duplicate indices and discarding groups that end up too small or too big.
fn materialize_groups(raw: &[RawGroup], seeds: &[SeedTriplet]) -> Vec<SeedGroup> {
    raw.iter()
        .filter_map(|group| {
            let mut seen = Vec::new();
            let triplets: Vec<SeedTriplet> = group
                .indices
                .iter()
                .filter(|&&i| i < seeds.len() && !seen.contains(&i) && {
                    seen.push(i);
                    true
                })
                .map(|&i| seeds[i].clone())
                .collect();

            if (MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&triplets.len()) {
                Some(SeedGroup {
                    triplets,
                    explanation: group.explanation.clone(),
                })
            } else {
                None
            }
        })
        .collect()
}

fn default_group(seeds: &[SeedTriplet]) -> SeedGroup {
    SeedGroup {
        triplets: seeds[..MIN_GROUP_SIZE].to_vec(),
        explanation: "Default pairing: contrasting perspectives and combined wordplay \
            across the two strongest seeds."
            .to_string(),
    }
}
