//! Judging phase: rates every joke against the rubric, selects the top
//! seeds, and crowns a winner through the tournament.

pub mod admissibility;
pub mod batch;
pub mod models;
pub mod prompts;
pub mod rating;
pub mod rubric;

use std::sync::Arc;

use tracing::info;

use crate::errors::AppError;
use crate::generator::models::GeneratedJoke;
use crate::judges::batch::BatchProcessor;
use crate::judges::models::RatingResult;
use crate::judges::rating::RatingJudge;
use crate::judges::rubric::Rubric;
use crate::llm_client::LlmClient;
use crate::tournament::{
    Candidate, LlmComparator, PairwiseJudge, TournamentEngine, TournamentResult,
};

/// Everything the judging phase produces, for reporting.
pub struct EvaluationOutcome {
    pub ratings: Vec<RatingResult>,
    pub top_candidates: Vec<Candidate>,
    pub tournament: TournamentResult,
}

/// Runs the complete judging pipeline: batch rating, top-N seeding, and the
/// tournament. Fails only when no admissible joke survives rating; once the
/// tournament starts it always produces a result.
pub async fn evaluate_jokes(
    llm: &LlmClient,
    rubric: Arc<Rubric>,
    jokes: &[GeneratedJoke],
    batch_size: usize,
    top_count: usize,
) -> Result<EvaluationOutcome, AppError> {
    if jokes.is_empty() {
        return Err(AppError::InvalidInput("no jokes to evaluate".to_string()));
    }

    let judge = RatingJudge::new(llm.clone(), Arc::clone(&rubric));
    let ratings = BatchProcessor::new(judge, batch_size).process_all(jokes).await;

    let top_candidates = select_top_candidates(&ratings, top_count);
    if top_candidates.is_empty() {
        return Err(AppError::InvalidInput(
            "no admissible jokes survived the rating phase".to_string(),
        ));
    }
    info!(selected = top_candidates.len(), "top jokes seeded for tournament");

    let comparator = Arc::new(LlmComparator::new(llm.clone(), &rubric));
    let engine = TournamentEngine::new(PairwiseJudge::new(comparator));
    let tournament = engine.run(top_candidates.clone()).await?;

    Ok(EvaluationOutcome {
        ratings,
        top_candidates,
        tournament,
    })
}

/// Seeds the tournament: admissible jokes sorted by rating (ties broken by
/// joke id for determinism), the best `top_count` taken, seed ranks 1..=N.
pub fn select_top_candidates(ratings: &[RatingResult], top_count: usize) -> Vec<Candidate> {
    let mut admissible: Vec<&RatingResult> = ratings
        .iter()
        .filter(|r| r.admissibility.is_admissible())
        .collect();
    admissible.sort_by(|a, b| {
        b.overall_rating
            .total_cmp(&a.overall_rating)
            .then(a.joke_id.cmp(&b.joke_id))
    });

    admissible
        .into_iter()
        .take(top_count)
        .enumerate()
        .map(|(i, r)| Candidate {
            id: r.joke_id,
            text: r.joke_text.clone(),
            overall_rating: r.overall_rating,
            seed_rank: i as u32 + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judges::models::{AdmissibilityCheck, AdmissibilityReport};

    fn report(passed: bool) -> AdmissibilityReport {
        let check = || AdmissibilityCheck {
            passed,
            reasoning: "test".to_string(),
        };
        AdmissibilityReport {
            intent: check(),
            completeness: check(),
            appropriateness: check(),
            coherence: check(),
            accessibility: check(),
        }
    }

    fn rating(joke_id: u32, overall: f64, admissible: bool) -> RatingResult {
        RatingResult {
            joke_id,
            joke_text: format!("joke {joke_id}"),
            admissibility: report(admissible),
            assigned_categories: vec![],
            dropped_categories: vec![],
            factor_scores: Default::default(),
            max_score: 0,
            mean_score: 0.0,
            overall_rating: overall,
        }
    }

    #[test]
    fn test_top_selection_orders_by_rating_and_assigns_seeds() {
        let ratings = vec![
            rating(1, 2.5, true),
            rating(2, 4.1, true),
            rating(3, 3.3, true),
        ];
        let top = select_top_candidates(&ratings, 10);
        let ids: Vec<u32> = top.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        let seeds: Vec<u32> = top.iter().map(|c| c.seed_rank).collect();
        assert_eq!(seeds, vec![1, 2, 3]);
    }

    #[test]
    fn test_top_selection_filters_inadmissible_and_caps() {
        let ratings = vec![
            rating(1, 4.9, false),
            rating(2, 3.0, true),
            rating(3, 2.0, true),
            rating(4, 1.0, true),
        ];
        let top = select_top_candidates(&ratings, 2);
        let ids: Vec<u32> = top.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_top_selection_breaks_rating_ties_by_id() {
        let ratings = vec![rating(9, 3.0, true), rating(4, 3.0, true)];
        let top = select_top_candidates(&ratings, 2);
        let ids: Vec<u32> = top.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![4, 9]);
    }
}
