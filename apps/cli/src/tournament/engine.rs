//! Tournament engine: drives rounds to completion and assembles the result.
//!
//! Rounds are a hard ordering barrier: round N+1's bracket is not built until
//! every match of round N is resolved and lives are settled. Within a round
//! the matches are independent (each active candidate appears in at most one)
//! and run concurrently.

use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::tournament::bracket::build_round;
use crate::tournament::judge::PairwiseJudge;
use crate::tournament::models::{
    Candidate, FinalRanking, MatchRecord, MatchSide, PairVerdict, Resolution, TournamentResult,
};
use crate::tournament::survivorship::SurvivorshipTracker;

pub struct TournamentEngine {
    judge: PairwiseJudge,
}

impl TournamentEngine {
    pub fn new(judge: PairwiseJudge) -> Self {
        Self { judge }
    }

    /// Runs the bracket to a single survivor.
    ///
    /// An empty entrant list is a precondition violation surfaced as an input
    /// error; once started the tournament always completes, since oracle
    /// failures degrade inside the pairwise judge and never abort a round.
    pub async fn run(&self, entrants: Vec<Candidate>) -> Result<TournamentResult, AppError> {
        if entrants.is_empty() {
            return Err(AppError::InvalidInput(
                "tournament requires at least one candidate".to_string(),
            ));
        }

        let mut tracker = SurvivorshipTracker::new(&entrants);
        let mut matches: Vec<MatchRecord> = Vec::new();
        let mut active = entrants.clone();
        let mut round_number: u32 = 1;

        info!(
            participants = entrants.len(),
            "tournament starting (lives: seed 1 gets 3, seed 2 gets 2, seed 3 gets 1)"
        );

        while active.len() > 1 {
            let bracket = build_round(&active, round_number, &tracker);
            info!(
                round = round_number,
                name = %bracket.round_name,
                participants = active.len(),
                "round starting"
            );

            let mut survivors: Vec<Candidate> = Vec::new();

            if let Some(bye) = &bracket.bye {
                tracker.record_bye(bye.id, round_number);
                info!(
                    candidate = bye.id,
                    seed = bye.seed_rank,
                    "bye: advances automatically"
                );
                matches.push(bye_record(bye, round_number, &bracket.round_name, &tracker));
                survivors.push(bye.clone());
            }

            // Fan out every real pair; the round barrier is the join below.
            let mut set = JoinSet::new();
            for (idx, (a, b)) in bracket.pairs.iter().enumerate() {
                let judge = self.judge.clone();
                let a = a.clone();
                let b = b.clone();
                set.spawn(async move {
                    let verdict = judge.resolve(&a, &b).await;
                    (idx, a, b, verdict)
                });
            }

            let mut resolved: Vec<Option<(Candidate, Candidate, PairVerdict)>> =
                (0..bracket.pairs.len()).map(|_| None).collect();
            while let Some(joined) = set.join_next().await {
                let (idx, a, b, verdict) = joined.expect("match task panicked");
                resolved[idx] = Some((a, b, verdict));
            }

            for slot in resolved {
                let (a, b, verdict) = slot.expect("round left an unresolved match");
                let record =
                    self.settle_match(&a, &b, verdict, round_number, &bracket.round_name, &mut tracker);

                let winner = if record.winner_id == a.id { &a } else { &b };
                let loser = if record.winner_id == a.id { &b } else { &a };
                survivors.push(winner.clone());
                if record.loser_advanced_by_life {
                    info!(
                        winner = winner.id,
                        loser = loser.id,
                        lives_left = tracker.lives_remaining(loser.id),
                        "loser spends a life and advances"
                    );
                    survivors.push(loser.clone());
                } else {
                    info!(winner = winner.id, eliminated = loser.id, "match settled");
                }
                matches.push(record);
            }

            debug!(
                round = round_number,
                advancing = survivors.len(),
                lives_used_total = tracker.total_lives_used(),
                "round complete"
            );

            active = survivors;
            round_number += 1;
        }

        let winner = active.into_iter().next().expect("no survivor after loop");
        let total_rounds = round_number - 1;
        info!(
            winner = winner.id,
            rounds = total_rounds,
            lives_used = tracker.total_lives_used(),
            "tournament complete"
        );

        let final_rankings = compute_final_rankings(&entrants, &matches, &tracker);

        Ok(TournamentResult {
            winner,
            final_rankings,
            lives_ledger: tracker.lives_ledger(),
            bye_ledger: tracker.bye_ledger(),
            matches,
            total_rounds,
            participant_count: entrants.len(),
        })
    }

    /// Applies one resolved verdict: snapshots lives, consumes the loser's
    /// life if available, and produces the immutable match record.
    fn settle_match(
        &self,
        a: &Candidate,
        b: &Candidate,
        verdict: PairVerdict,
        round_number: u32,
        round_name: &str,
        tracker: &mut SurvivorshipTracker,
    ) -> MatchRecord {
        let side_a = MatchSide {
            id: a.id,
            seed_rank: a.seed_rank,
            lives_before: tracker.lives_remaining(a.id),
        };
        let side_b = MatchSide {
            id: b.id,
            seed_rank: b.seed_rank,
            lives_before: tracker.lives_remaining(b.id),
        };

        let loser_id = if verdict.winner_id == a.id { b.id } else { a.id };
        let loser_advanced_by_life = tracker.consume_life_if_available(loser_id);

        MatchRecord {
            round_number,
            round_name: round_name.to_string(),
            side_a,
            side_b: Some(side_b),
            winner_id: verdict.winner_id,
            loser_advanced_by_life,
            confidence: verdict.confidence,
            consistent: verdict.consistent,
            resolution: verdict.resolution,
            ab: Some(verdict.ab),
            ba: Some(verdict.ba),
            rationale: verdict.rationale,
        }
    }
}

fn bye_record(
    bye: &Candidate,
    round_number: u32,
    round_name: &str,
    tracker: &SurvivorshipTracker,
) -> MatchRecord {
    MatchRecord {
        round_number,
        round_name: round_name.to_string(),
        side_a: MatchSide {
            id: bye.id,
            seed_rank: bye.seed_rank,
            lives_before: tracker.lives_remaining(bye.id),
        },
        side_b: None,
        winner_id: bye.id,
        loser_advanced_by_life: false,
        confidence: 0.0,
        consistent: true,
        resolution: Resolution::Bye,
        ab: None,
        ba: None,
        rationale: "Advanced automatically on a bye".to_string(),
    }
}

/// Folds over the match log to place every original entrant.
///
/// A candidate's elimination round is the round it lost without a life to
/// spend; the champion (never eliminated) ranks as `max_round + 1`. Later
/// elimination places higher; ties break by seed rank.
fn compute_final_rankings(
    entrants: &[Candidate],
    matches: &[MatchRecord],
    tracker: &SurvivorshipTracker,
) -> Vec<FinalRanking> {
    let max_round = matches.iter().map(|m| m.round_number).max().unwrap_or(0);

    let elimination_round = |id: u32| -> u32 {
        matches
            .iter()
            .filter(|m| !m.is_bye() && !m.loser_advanced_by_life)
            .find(|m| m.loser_id() == Some(id))
            .map(|m| m.round_number)
            .unwrap_or(max_round + 1)
    };

    let mut placed: Vec<&Candidate> = entrants.iter().collect();
    placed.sort_by_key(|c| (std::cmp::Reverse(elimination_round(c.id)), c.seed_rank));

    placed
        .into_iter()
        .enumerate()
        .map(|(i, c)| FinalRanking {
            candidate: c.clone(),
            placement: i as u32 + 1,
            lives_remaining: tracker.lives_remaining(c.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::llm_client::LlmError;
    use crate::tournament::models::{ComparisonOutcome, Side};
    use crate::tournament::oracle::ComparatorOracle;

    fn candidate(id: u32, rating: f64, seed: u32) -> Candidate {
        Candidate {
            id,
            text: format!("joke {id}"),
            overall_rating: rating,
            seed_rank: seed,
        }
    }

    /// Oracle scripted per (first, second) text ordering.
    struct ScriptedOracle {
        outcomes: HashMap<(String, String), (Side, f64)>,
    }

    impl ScriptedOracle {
        fn new(entries: Vec<(&str, &str, Side, f64)>) -> Self {
            Self {
                outcomes: entries
                    .into_iter()
                    .map(|(a, b, s, c)| ((a.to_string(), b.to_string()), (s, c)))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl ComparatorOracle for ScriptedOracle {
        async fn compare(
            &self,
            text_a: &str,
            text_b: &str,
        ) -> Result<ComparisonOutcome, LlmError> {
            match self.outcomes.get(&(text_a.to_string(), text_b.to_string())) {
                Some(&(winner, confidence)) => Ok(ComparisonOutcome {
                    winner,
                    confidence,
                    reasoning: "scripted".to_string(),
                }),
                None => panic!("unscripted comparison: {text_a:?} vs {text_b:?}"),
            }
        }
    }

    /// Oracle that always prefers the lower-id joke, consistently in both
    /// orderings, at a fixed mid confidence.
    struct LowerIdWins;

    #[async_trait]
    impl ComparatorOracle for LowerIdWins {
        async fn compare(
            &self,
            text_a: &str,
            text_b: &str,
        ) -> Result<ComparisonOutcome, LlmError> {
            let id = |t: &str| {
                t.rsplit(' ')
                    .next()
                    .and_then(|n| n.parse::<u32>().ok())
                    .expect("test joke text carries an id")
            };
            let winner = if id(text_a) < id(text_b) {
                Side::A
            } else {
                Side::B
            };
            Ok(ComparisonOutcome {
                winner,
                confidence: 3.0,
                reasoning: "lower id".to_string(),
            })
        }
    }

    fn engine(oracle: Arc<dyn ComparatorOracle>) -> TournamentEngine {
        TournamentEngine::new(PairwiseJudge::new(oracle))
    }

    #[tokio::test]
    async fn test_empty_input_is_an_error() {
        let engine = engine(Arc::new(LowerIdWins));
        let result = engine.run(vec![]).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_single_candidate_wins_without_rounds() {
        let engine = engine(Arc::new(LowerIdWins));
        let result = engine.run(vec![candidate(7, 4.0, 1)]).await.unwrap();

        assert_eq!(result.winner.id, 7);
        assert_eq!(result.total_rounds, 0);
        assert!(result.matches.is_empty());
        assert_eq!(result.final_rankings.len(), 1);
        assert_eq!(result.final_rankings[0].placement, 1);
    }

    // The four-candidate walk-through: consistent round 1 favourite, a
    // near-tie saved by a life, a bye, and a rematch.
    #[tokio::test]
    async fn test_four_candidate_scenario() {
        let entrants = vec![
            candidate(1, 4.5, 1),
            candidate(2, 4.1, 2),
            candidate(3, 3.9, 3),
            candidate(4, 3.0, 4),
        ];
        let oracle = ScriptedOracle::new(vec![
            // Round 1, match (1,4): both directions agree on 1.
            ("joke 1", "joke 4", Side::A, 3.5),
            ("joke 4", "joke 1", Side::B, 4.0),
            // Match (2,3): each direction backs its first-listed at near-tie
            // confidence; candidate 2 wins on rating, 3 spends its life.
            // The same script serves the round 2 rematch, where 3 has no
            // lives left and is eliminated.
            ("joke 2", "joke 3", Side::A, 1.2),
            ("joke 3", "joke 2", Side::A, 1.3),
            // Finals: 1 beats 2 in both orderings. The final repeats while
            // candidate 2 spends its two lives (rounds 3-5).
            ("joke 1", "joke 2", Side::A, 4.0),
            ("joke 2", "joke 1", Side::B, 4.0),
        ]);
        let engine = engine(Arc::new(oracle));
        let result = engine.run(entrants).await.unwrap();

        assert_eq!(result.winner.id, 1);
        assert_eq!(result.total_rounds, 5);
        assert_eq!(result.participant_count, 4);

        // Round 1: two matches, no bye.
        let r1: Vec<_> = result.matches.iter().filter(|m| m.round_number == 1).collect();
        assert_eq!(r1.len(), 2);
        assert!(r1.iter().all(|m| !m.is_bye()));

        let m14 = r1.iter().find(|m| m.side_a.id == 1).unwrap();
        assert_eq!(m14.winner_id, 1);
        assert_eq!(m14.resolution, Resolution::Consistent);
        assert!((m14.confidence - 3.75).abs() < 1e-9);
        assert!(!m14.loser_advanced_by_life); // seed 4 has no lives

        let m23 = r1.iter().find(|m| m.side_a.id == 2).unwrap();
        assert_eq!(m23.winner_id, 2);
        assert_eq!(m23.resolution, Resolution::ByRating);
        assert!(m23.loser_advanced_by_life); // seed 3 spends its one life

        // Round 2: bye to candidate 1 (best seed, no prior bye), rematch 2v3.
        let r2: Vec<_> = result.matches.iter().filter(|m| m.round_number == 2).collect();
        assert_eq!(r2.len(), 2);
        let bye = r2.iter().find(|m| m.is_bye()).unwrap();
        assert_eq!(bye.side_a.id, 1);
        assert_eq!(bye.resolution, Resolution::Bye);
        let rematch = r2.iter().find(|m| !m.is_bye()).unwrap();
        assert_eq!(rematch.winner_id, 2);
        assert!(!rematch.loser_advanced_by_life); // 3 is out of lives now

        // Final rankings follow elimination order.
        let order: Vec<u32> = result.final_rankings.iter().map(|r| r.candidate.id).collect();
        assert_eq!(order, vec![1, 2, 3, 4]);
        assert_eq!(
            result.final_rankings.iter().map(|r| r.placement).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );

        // Ledgers: candidate 3 used its single life, the runner-up both of
        // its own; the only bye went to candidate 1 in round 2.
        let c3 = &result.lives_ledger[&3];
        assert_eq!((c3.initial, c3.used, c3.remaining), (1, 1, 0));
        let c2 = &result.lives_ledger[&2];
        assert_eq!((c2.initial, c2.used, c2.remaining), (2, 2, 0));
        assert_eq!(result.bye_ledger[&1], vec![2]);

        // Lives-used accounting matches the match log.
        let advanced = result
            .matches
            .iter()
            .filter(|m| m.loser_advanced_by_life)
            .count() as u32;
        let used: u32 = result.lives_ledger.values().map(|e| e.used).sum();
        assert_eq!(advanced, used);
    }

    // Five entrants with a deterministic favourite: exercises repeated byes,
    // the no-consecutive-bye rule, and the favourite grinding through the
    // runner-up's lives in repeated finals.
    #[tokio::test]
    async fn test_five_candidate_byes_and_lives() {
        let entrants: Vec<Candidate> = (1..=5)
            .map(|i| candidate(i, 5.0 - i as f64 * 0.2, i))
            .collect();
        let engine = engine(Arc::new(LowerIdWins));
        let result = engine.run(entrants).await.unwrap();

        assert_eq!(result.winner.id, 1);
        assert_eq!(result.total_rounds, 6);

        // Exactly one bye per odd round, none in even-size rounds.
        assert_eq!(result.bye_ledger[&1], vec![1, 3]);
        assert_eq!(result.bye_ledger[&2], vec![2]);

        // No consecutive byes: candidate 1 sat out rounds 1 and 3, not 2.
        for rounds in result.bye_ledger.values() {
            for pair in rounds.windows(2) {
                assert!(pair[1] > pair[0] + 1, "consecutive bye in {rounds:?}");
            }
        }

        // Runner-up spent both lives in the repeated finals.
        let c2 = &result.lives_ledger[&2];
        assert_eq!((c2.initial, c2.used, c2.remaining), (2, 2, 0));

        let order: Vec<u32> = result.final_rankings.iter().map(|r| r.candidate.id).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);

        // Every odd-count round logged exactly one bye.
        for round in 1..=result.total_rounds {
            let byes = result
                .matches
                .iter()
                .filter(|m| m.round_number == round && m.is_bye())
                .count();
            assert!(byes <= 1, "round {round} had {byes} byes");
        }

        let advanced = result
            .matches
            .iter()
            .filter(|m| m.loser_advanced_by_life)
            .count() as u32;
        let used: u32 = result.lives_ledger.values().map(|e| e.used).sum();
        assert_eq!(advanced, used);
    }

    #[tokio::test]
    async fn test_three_candidates_round_one_bye_goes_to_best_seed() {
        let entrants = vec![
            candidate(1, 4.0, 1),
            candidate(2, 3.5, 2),
            candidate(3, 3.0, 3),
        ];
        let engine = engine(Arc::new(LowerIdWins));
        let result = engine.run(entrants).await.unwrap();

        let r1_bye = result
            .matches
            .iter()
            .find(|m| m.round_number == 1 && m.is_bye())
            .unwrap();
        assert_eq!(r1_bye.side_a.id, 1);

        let r1_match = result
            .matches
            .iter()
            .find(|m| m.round_number == 1 && !m.is_bye())
            .unwrap();
        assert_eq!(r1_match.side_a.id, 2);
        assert_eq!(r1_match.side_b.as_ref().unwrap().id, 3);
    }
}
