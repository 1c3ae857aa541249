//! Bracket construction: pairs the round's active candidates.
//!
//! Traditional bracket seeding: best seed plays worst seed. Odd counts award
//! exactly one bye, preferring the best seed that did not sit out the
//! previous round.

use crate::tournament::models::Candidate;
use crate::tournament::survivorship::SurvivorshipTracker;

/// One round's pairing: an optional bye recipient plus the ordered pairs.
#[derive(Debug)]
pub struct RoundBracket {
    pub round_name: String,
    pub bye: Option<Candidate>,
    pub pairs: Vec<(Candidate, Candidate)>,
}

/// Human label for a round, from its participant count.
pub fn round_name(participant_count: usize) -> String {
    match participant_count {
        2 => "Final".to_string(),
        3 => "Semi-Final (with bye)".to_string(),
        4 => "Semi-Final".to_string(),
        n if n <= 8 => "Quarter-Final".to_string(),
        n => format!("Round of {n}"),
    }
}

/// Builds the round's bracket from the active list.
///
/// Contract: `active` holds at least two candidates; the engine terminates
/// before a single survivor reaches here. A violation means the round loop is
/// broken, so fail loudly rather than limp on.
pub fn build_round(
    active: &[Candidate],
    round_number: u32,
    tracker: &SurvivorshipTracker,
) -> RoundBracket {
    assert!(
        active.len() >= 2,
        "bracket construction requires at least two active candidates, got {}",
        active.len()
    );

    let round_name = round_name(active.len());

    let mut seeded: Vec<Candidate> = active.to_vec();
    seeded.sort_by_key(|c| c.seed_rank);

    let bye = if seeded.len() % 2 == 1 {
        let recipient = select_bye_recipient(&seeded, round_number, tracker);
        seeded.retain(|c| c.id != recipient.id);
        Some(recipient)
    } else {
        None
    };

    // 1-vs-N, 2-vs-(N-1), ... on the now even-count pool.
    let half = seeded.len() / 2;
    let pairs = (0..half)
        .map(|i| (seeded[i].clone(), seeded[seeded.len() - 1 - i].clone()))
        .collect();

    RoundBracket {
        round_name,
        bye,
        pairs,
    }
}

/// Best-seeded candidate without a bye in the immediately preceding round.
/// If every active candidate sat out last round (degenerate), the best seed
/// gets it regardless.
fn select_bye_recipient(
    seeded: &[Candidate],
    round_number: u32,
    tracker: &SurvivorshipTracker,
) -> Candidate {
    seeded
        .iter()
        .find(|c| !tracker.had_bye_last_round(c.id, round_number))
        .unwrap_or(&seeded[0])
        .clone()
}
