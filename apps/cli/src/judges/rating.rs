//! Rating judge: the factor-based rubric scorer for a single joke.
//!
//! Pipeline per joke: admissibility gates → category assignment → factor
//! selection per category → 0-5 factor scoring → overall rating. Every LLM
//! step degrades rather than fails: classification falls back to
//! Independent, a lost score defaults to a neutral 3.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::generator::models::GeneratedJoke;
use crate::judges::admissibility::check_admissibility;
use crate::judges::models::RatingResult;
use crate::judges::prompts::{
    CATEGORY_PROMPT_TEMPLATE, CATEGORY_SYSTEM, FACTOR_SCORE_PROMPT_TEMPLATE, FACTOR_SCORE_SYSTEM,
    FACTOR_SELECT_PROMPT_TEMPLATE, FACTOR_SELECT_SYSTEM,
};
use crate::judges::rubric::{Factor, Rubric};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::LlmClient;

/// Category label for jokes that fit none of the rubric's categories; they
/// draw factors from the whole rubric instead.
pub const INDEPENDENT: &str = "Independent";

/// Caps for the Independent path, to keep the selection prompt bounded.
const INDEPENDENT_FACTORS_LISTED: usize = 20;
const INDEPENDENT_FACTORS_SELECTED: usize = 10;

/// Neutral fallback when a score is unrecoverable.
const DEFAULT_SCORE: u8 = 3;

#[derive(Debug, Deserialize)]
struct CategoryAssignment {
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    is_independent: bool,
}

#[derive(Debug, Deserialize)]
struct FactorSelection {
    #[serde(default)]
    relevant_factors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FactorScore {
    score: i64,
}

#[derive(Clone)]
pub struct RatingJudge {
    llm: LlmClient,
    rubric: Arc<Rubric>,
}

impl RatingJudge {
    pub fn new(llm: LlmClient, rubric: Arc<Rubric>) -> Self {
        Self { llm, rubric }
    }

    pub async fn evaluate(&self, joke: &GeneratedJoke) -> RatingResult {
        let admissibility = check_admissibility(&self.llm, &joke.text).await;
        if !admissibility.is_admissible() {
            debug!(
                joke = joke.id,
                failed = ?admissibility.failed_checks(),
                "joke inadmissible"
            );
            return RatingResult::inadmissible(joke.id, joke.text.clone(), admissibility);
        }

        let (assigned_categories, independent) = self.classify(&joke.text).await;
        let (factors, dropped_categories) = self
            .select_factors(&joke.text, &assigned_categories, independent)
            .await;
        let factor_scores = self.score_factors(&joke.text, factors).await;

        let (max_score, mean_score, overall_rating) = compute_overall(&factor_scores);

        RatingResult {
            joke_id: joke.id,
            joke_text: joke.text.clone(),
            admissibility,
            assigned_categories,
            dropped_categories,
            factor_scores,
            max_score,
            mean_score,
            overall_rating,
        }
    }

    /// Assigns rubric categories; anything unrecognized or empty collapses to
    /// Independent.
    async fn classify(&self, joke_text: &str) -> (Vec<String>, bool) {
        let prompt = CATEGORY_PROMPT_TEMPLATE
            .replace("{categories}", &self.rubric.category_names().join(", "))
            .replace("{joke}", joke_text);
        let system = format!("{CATEGORY_SYSTEM} {JSON_ONLY_INSTRUCTION}");

        let assignment = match self.llm.call_json::<CategoryAssignment>(&prompt, &system).await {
            Ok(a) => a,
            Err(e) => {
                warn!("category assignment failed, treating as Independent: {e}");
                return (vec![INDEPENDENT.to_string()], true);
            }
        };

        if assignment.is_independent {
            return (vec![INDEPENDENT.to_string()], true);
        }

        // Keep only names that resolve to a rubric category, canonically
        // spelled.
        let valid: Vec<String> = assignment
            .categories
            .iter()
            .filter_map(|name| self.rubric.category(name).map(|c| c.name.clone()))
            .collect();

        if valid.is_empty() {
            (vec![INDEPENDENT.to_string()], true)
        } else {
            (valid, false)
        }
    }

    /// Selects the applicable factors. Normal categories run concurrently;
    /// a category whose selection comes back empty is dropped. Independent
    /// jokes select from the whole rubric.
    async fn select_factors(
        &self,
        joke_text: &str,
        categories: &[String],
        independent: bool,
    ) -> (Vec<Factor>, Vec<String>) {
        if independent {
            let factors = self.select_independent_factors(joke_text).await;
            return (factors, Vec::new());
        }

        let mut set = JoinSet::new();
        for category in categories {
            let judge = self.clone();
            let category = category.clone();
            let joke_text = joke_text.to_string();
            set.spawn(async move {
                let selected = judge.select_category_factors(&joke_text, &category).await;
                (category, selected)
            });
        }

        let mut by_category: BTreeMap<String, Vec<Factor>> = BTreeMap::new();
        while let Some(joined) = set.join_next().await {
            let (category, selected) = joined.expect("factor selection task panicked");
            by_category.insert(category, selected);
        }

        let mut factors = Vec::new();
        let mut dropped = Vec::new();
        // Preserve assignment order rather than map order.
        for category in categories {
            match by_category.remove(category) {
                Some(selected) if !selected.is_empty() => factors.extend(selected),
                _ => dropped.push(category.clone()),
            }
        }
        (factors, dropped)
    }

    async fn select_category_factors(&self, joke_text: &str, category: &str) -> Vec<Factor> {
        let Some(category_def) = self.rubric.category(category) else {
            return Vec::new();
        };
        let listing = category_def
            .factors
            .iter()
            .map(|f| format!("{}: {}", f.name, f.description))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = FACTOR_SELECT_PROMPT_TEMPLATE
            .replace("{category}", category)
            .replace("{factors}", &listing)
            .replace("{joke}", joke_text);
        let system = format!("{FACTOR_SELECT_SYSTEM} {JSON_ONLY_INSTRUCTION}");

        let selection = match self.llm.call_json::<FactorSelection>(&prompt, &system).await {
            Ok(s) => s,
            Err(e) => {
                warn!(category, "factor selection failed, dropping category: {e}");
                return Vec::new();
            }
        };

        resolve_factor_names(&selection.relevant_factors, &category_def.factors)
    }

    async fn select_independent_factors(&self, joke_text: &str) -> Vec<Factor> {
        let all: Vec<&Factor> = self.rubric.all_factors();
        let listing = all
            .iter()
            .take(INDEPENDENT_FACTORS_LISTED)
            .map(|f| format!("{}: {}", f.name, f.description))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = FACTOR_SELECT_PROMPT_TEMPLATE
            .replace("{category}", INDEPENDENT)
            .replace("{factors}", &listing)
            .replace("{joke}", joke_text);
        let system = format!("{FACTOR_SELECT_SYSTEM} {JSON_ONLY_INSTRUCTION}");

        let selection = match self.llm.call_json::<FactorSelection>(&prompt, &system).await {
            Ok(s) => s,
            Err(e) => {
                warn!("independent factor selection failed: {e}");
                return Vec::new();
            }
        };

        let owned: Vec<Factor> = all.into_iter().cloned().collect();
        let mut resolved = resolve_factor_names(&selection.relevant_factors, &owned);
        resolved.truncate(INDEPENDENT_FACTORS_SELECTED);
        resolved
    }

    /// Scores every selected factor concurrently. One score per factor name;
    /// a failed call records the neutral default instead.
    async fn score_factors(&self, joke_text: &str, factors: Vec<Factor>) -> BTreeMap<String, u8> {
        let mut set = JoinSet::new();
        for factor in factors {
            let judge = self.clone();
            let joke_text = joke_text.to_string();
            set.spawn(async move {
                let score = judge.score_single_factor(&joke_text, &factor).await;
                (factor.name, score)
            });
        }

        let mut scores = BTreeMap::new();
        while let Some(joined) = set.join_next().await {
            let (name, score) = joined.expect("factor scoring task panicked");
            scores.insert(name, score);
        }
        scores
    }

    async fn score_single_factor(&self, joke_text: &str, factor: &Factor) -> u8 {
        let positives = bullet_list(&factor.positive_examples);
        let negatives = bullet_list(&factor.negative_examples);

        let prompt = FACTOR_SCORE_PROMPT_TEMPLATE
            .replace("{factor_name}", &factor.name)
            .replace("{factor_description}", &factor.description)
            .replace("{positive_examples}", &positives)
            .replace("{negative_examples}", &negatives)
            .replace("{joke}", joke_text);
        let system = format!("{FACTOR_SCORE_SYSTEM} {JSON_ONLY_INSTRUCTION}");

        match self.llm.call_json::<FactorScore>(&prompt, &system).await {
            Ok(parsed) => parsed.score.clamp(0, 5) as u8,
            Err(e) => {
                warn!(factor = %factor.name, "factor scoring failed, defaulting to {DEFAULT_SCORE}: {e}");
                DEFAULT_SCORE
            }
        }
    }
}

/// Matches the model's selected names back to factor definitions,
/// case-insensitively, keeping rubric order and dropping hallucinated names.
fn resolve_factor_names(selected: &[String], available: &[Factor]) -> Vec<Factor> {
    available
        .iter()
        .filter(|f| {
            selected
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&f.name))
        })
        .cloned()
        .collect()
}

fn bullet_list(examples: &[String]) -> String {
    examples
        .iter()
        .take(3)
        .map(|ex| format!("- {ex}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rating math: `(max*10 + mean + n/5) / 12`. The factor-count term rewards
/// engaging more comedic dimensions; the divisor normalizes below 5.
pub fn compute_overall(scores: &BTreeMap<String, u8>) -> (u8, f64, f64) {
    if scores.is_empty() {
        return (0, 0.0, 0.0);
    }
    let max = scores.values().copied().max().unwrap_or(0);
    let mean = scores.values().map(|&s| s as f64).sum::<f64>() / scores.len() as f64;
    let overall = (max as f64 * 10.0 + mean + scores.len() as f64 / 5.0) / 12.0;
    (max, mean, overall)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(entries: &[(&str, u8)]) -> BTreeMap<String, u8> {
        entries
            .iter()
            .map(|&(name, score)| (name.to_string(), score))
            .collect()
    }

    #[test]
    fn test_overall_rating_formula() {
        let scores = scores(&[("a", 4), ("b", 2), ("c", 3)]);
        let (max, mean, overall) = compute_overall(&scores);
        assert_eq!(max, 4);
        assert!((mean - 3.0).abs() < 1e-9);
        // (4*10 + 3 + 3/5) / 12
        assert!((overall - (40.0 + 3.0 + 0.6) / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_rating_stays_below_five() {
        let scores = scores(&[
            ("a", 5),
            ("b", 5),
            ("c", 5),
            ("d", 5),
            ("e", 5),
            ("f", 5),
            ("g", 5),
            ("h", 5),
        ]);
        let (_, _, overall) = compute_overall(&scores);
        assert!(overall < 5.0, "got {overall}");
    }

    #[test]
    fn test_no_scores_rates_zero() {
        let (max, mean, overall) = compute_overall(&BTreeMap::new());
        assert_eq!(max, 0);
        assert_eq!(mean, 0.0);
        assert_eq!(overall, 0.0);
    }

    #[test]
    fn test_resolve_factor_names_case_insensitive_and_ordered() {
        let available = vec![
            Factor {
                name: "pun_quality".to_string(),
                description: String::new(),
                positive_examples: vec![],
                negative_examples: vec![],
            },
            Factor {
                name: "misdirection".to_string(),
                description: String::new(),
                positive_examples: vec![],
                negative_examples: vec![],
            },
        ];
        let selected = vec!["MISDIRECTION".to_string(), "Pun_Quality".to_string()];
        let resolved = resolve_factor_names(&selected, &available);
        // Rubric order, not selection order.
        let names: Vec<&str> = resolved.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["pun_quality", "misdirection"]);
    }

    #[test]
    fn test_resolve_factor_names_drops_hallucinations() {
        let available = vec![Factor {
            name: "economy".to_string(),
            description: String::new(),
            positive_examples: vec![],
            negative_examples: vec![],
        }];
        let selected = vec!["economy".to_string(), "vibes".to_string()];
        let resolved = resolve_factor_names(&selected, &available);
        assert_eq!(resolved.len(), 1);
    }
}
