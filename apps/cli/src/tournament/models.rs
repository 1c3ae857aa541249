//! Data model for the tournament phase.
//!
//! Match history is an append-only log of immutable records; lives, byes and
//! elimination rounds are derived by folding over it. Candidates never carry
//! back-references to matches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A tournament entrant: a rated joke carrying its pre-tournament seed.
/// `seed_rank` is ordinal (1 = best) and drives bracket pairing, lives
/// assignment and tie-breaks. `overall_rating` is the raw rating-phase score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: u32,
    pub text: String,
    pub overall_rating: f64,
    pub seed_rank: u32,
}

/// Which side of a single directional comparison won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

/// Raw outcome of one directional oracle query, side-relative.
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonOutcome {
    pub winner: Side,
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
}

/// One directional comparison mapped back to actual candidate ids.
#[derive(Debug, Clone, Serialize)]
pub struct DirectionalVerdict {
    pub winner_id: u32,
    pub confidence: f64,
    pub reasoning: String,
}

/// How a pairwise verdict was reached. Matched exhaustively by callers and
/// tests; recorded on every match for auditability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Both directional comparisons agreed on the winner.
    Consistent,
    /// Directions disagreed; the higher-confidence direction decided.
    ByConfidence,
    /// Near-tie; the higher pre-tournament rating decided.
    ByRating,
    /// Near-tie with equal ratings; the better seed decided.
    BySeed,
    /// No match was played; the candidate advanced automatically.
    Bye,
}

/// Resolved verdict for one pair, produced by the `PairwiseJudge`.
#[derive(Debug, Clone, Serialize)]
pub struct PairVerdict {
    pub winner_id: u32,
    pub confidence: f64,
    /// True when both directional comparisons agreed.
    pub consistent: bool,
    pub resolution: Resolution,
    pub ab: DirectionalVerdict,
    pub ba: DirectionalVerdict,
    pub rationale: String,
}

/// Snapshot of one participant at match time.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSide {
    pub id: u32,
    pub seed_rank: u32,
    pub lives_before: u32,
}

/// One pairwise encounter (or bye). Created once per pairing per round,
/// after life consumption is settled; immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub round_number: u32,
    pub round_name: String,
    pub side_a: MatchSide,
    /// `None` for a bye.
    pub side_b: Option<MatchSide>,
    pub winner_id: u32,
    pub loser_advanced_by_life: bool,
    pub confidence: f64,
    pub consistent: bool,
    pub resolution: Resolution,
    /// Raw directional results; absent for byes.
    pub ab: Option<DirectionalVerdict>,
    pub ba: Option<DirectionalVerdict>,
    pub rationale: String,
}

impl MatchRecord {
    pub fn is_bye(&self) -> bool {
        self.side_b.is_none()
    }

    /// The id of the losing side, if a match was actually played.
    pub fn loser_id(&self) -> Option<u32> {
        let b = self.side_b.as_ref()?;
        if self.winner_id == self.side_a.id {
            Some(b.id)
        } else {
            Some(self.side_a.id)
        }
    }
}

/// Per-candidate lives accounting for the final report.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LivesEntry {
    pub initial: u32,
    pub used: u32,
    pub remaining: u32,
}

/// A candidate's final tournament placement (1 = champion).
#[derive(Debug, Clone, Serialize)]
pub struct FinalRanking {
    pub candidate: Candidate,
    pub placement: u32,
    pub lives_remaining: u32,
}

/// Complete tournament snapshot returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct TournamentResult {
    pub winner: Candidate,
    pub final_rankings: Vec<FinalRanking>,
    pub lives_ledger: BTreeMap<u32, LivesEntry>,
    pub bye_ledger: BTreeMap<u32, Vec<u32>>,
    pub matches: Vec<MatchRecord>,
    pub total_rounds: u32,
    pub participant_count: usize,
}
