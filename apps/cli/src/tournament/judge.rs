//! Pairwise judge: turns two directional oracle queries into one resolved
//! verdict.
//!
//! LLM judges show position bias: the joke listed first wins more often than
//! it should. Every pair is therefore compared in both orderings and the two
//! results reconciled through an explicit resolution ladder.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::tournament::models::{
    Candidate, ComparisonOutcome, DirectionalVerdict, PairVerdict, Resolution, Side,
};
use crate::tournament::oracle::ComparatorOracle;

/// Valid confidence range; oracle values outside it are clamped, not rejected.
pub const CONFIDENCE_MIN: f64 = 1.0;
pub const CONFIDENCE_MAX: f64 = 5.0;

/// Disagreeing directions whose confidences both sit at or below this value
/// are near-ties, eligible for the rating tie-break.
pub const NEAR_TIE_CEILING: f64 = 2.0;

/// Maximum confidence gap for the near-tie path. The original system keyed
/// this on exact float equality, which almost never fires; a small epsilon is
/// the deliberate replacement.
pub const CONFIDENCE_EPSILON: f64 = 0.25;

#[derive(Clone)]
pub struct PairwiseJudge {
    oracle: Arc<dyn ComparatorOracle>,
}

impl PairwiseJudge {
    pub fn new(oracle: Arc<dyn ComparatorOracle>) -> Self {
        Self { oracle }
    }

    /// Resolves a single pair. Pure apart from the oracle calls: no shared
    /// state is touched, so matches within a round can run concurrently.
    ///
    /// A failed oracle query (retries exhausted) defaults that direction to
    /// its first-listed candidate at minimum confidence, a deliberately weak
    /// signal that rarely overrides a real result from the other direction.
    pub async fn resolve(&self, a: &Candidate, b: &Candidate) -> PairVerdict {
        let (ab_raw, ba_raw) = tokio::join!(
            self.oracle.compare(&a.text, &b.text),
            self.oracle.compare(&b.text, &a.text),
        );

        let ab = map_direction(ab_raw, a, b);
        let ba = map_direction(ba_raw, b, a);

        debug!(
            a = a.id,
            b = b.id,
            ab_winner = ab.winner_id,
            ab_confidence = ab.confidence,
            ba_winner = ba.winner_id,
            ba_confidence = ba.confidence,
            "directional comparisons complete"
        );

        let consistent = ab.winner_id == ba.winner_id;

        if consistent {
            let confidence = (ab.confidence + ba.confidence) / 2.0;
            let rationale = format!(
                "Both orderings prefer joke {}. AB: {} BA: {}",
                ab.winner_id, ab.reasoning, ba.reasoning
            );
            return PairVerdict {
                winner_id: ab.winner_id,
                confidence,
                consistent,
                resolution: Resolution::Consistent,
                ab,
                ba,
                rationale,
            };
        }

        let gap = (ab.confidence - ba.confidence).abs();
        let near_tie = ab.confidence <= NEAR_TIE_CEILING
            && ba.confidence <= NEAR_TIE_CEILING
            && gap < CONFIDENCE_EPSILON;

        if near_tie {
            let confidence = (ab.confidence + ba.confidence) / 2.0;
            let (resolution, winner) = break_near_tie(a, b);
            let rationale = match resolution {
                Resolution::ByRating => format!(
                    "Orderings disagree at near-tie confidence; joke {} wins on rating ({:.2} vs {:.2})",
                    winner.id, winner.overall_rating,
                    if winner.id == a.id { b.overall_rating } else { a.overall_rating }
                ),
                _ => format!(
                    "Orderings disagree at near-tie confidence with equal ratings; joke {} wins on seed {}",
                    winner.id, winner.seed_rank
                ),
            };
            return PairVerdict {
                winner_id: winner.id,
                confidence,
                consistent,
                resolution,
                ab,
                ba,
                rationale,
            };
        }

        // Directions disagree with a meaningful confidence gap: trust the
        // stronger signal.
        let (winner_id, confidence, picked) = if ab.confidence >= ba.confidence {
            (ab.winner_id, ab.confidence, "AB")
        } else {
            (ba.winner_id, ba.confidence, "BA")
        };
        let rationale = format!(
            "Orderings disagree; {picked} direction reported higher confidence, joke {winner_id} wins"
        );
        PairVerdict {
            winner_id,
            confidence,
            consistent,
            resolution: Resolution::ByConfidence,
            ab,
            ba,
            rationale,
        }
    }
}

/// Picks the near-tie winner: higher original rating, then better seed.
fn break_near_tie<'c>(a: &'c Candidate, b: &'c Candidate) -> (Resolution, &'c Candidate) {
    if a.overall_rating > b.overall_rating {
        (Resolution::ByRating, a)
    } else if b.overall_rating > a.overall_rating {
        (Resolution::ByRating, b)
    } else if a.seed_rank <= b.seed_rank {
        (Resolution::BySeed, a)
    } else {
        (Resolution::BySeed, b)
    }
}

/// Maps one directional result back to candidate ids, clamping confidence.
/// `first` is the candidate listed first in that direction's query.
fn map_direction(
    raw: Result<ComparisonOutcome, crate::llm_client::LlmError>,
    first: &Candidate,
    second: &Candidate,
) -> DirectionalVerdict {
    match raw {
        Ok(outcome) => {
            let winner_id = match outcome.winner {
                Side::A => first.id,
                Side::B => second.id,
            };
            DirectionalVerdict {
                winner_id,
                confidence: outcome.confidence.clamp(CONFIDENCE_MIN, CONFIDENCE_MAX),
                reasoning: outcome.reasoning,
            }
        }
        Err(e) => {
            warn!(
                first = first.id,
                second = second.id,
                "comparison failed after retries, defaulting to first-listed at minimum confidence: {e}"
            );
            DirectionalVerdict {
                winner_id: first.id,
                confidence: CONFIDENCE_MIN,
                reasoning: format!("Comparison failed: {e}"),
            }
        }
    }
}
