//! Survivorship tracking: the lives ledger and bye history.
//!
//! This is the only mutable tournament state. One tracker instance is owned
//! by the engine's round loop; nothing else writes to it. The bracket builder
//! guarantees a candidate appears in at most one match per round, so life
//! consumption is never attempted concurrently for the same id.

use std::collections::BTreeMap;

use crate::tournament::models::{Candidate, LivesEntry};

/// Lives granted at entry, purely from seed rank. Lives never increase.
fn lives_for_seed(seed_rank: u32) -> u32 {
    match seed_rank {
        1 => 3,
        2 => 2,
        3 => 1,
        _ => 0,
    }
}

#[derive(Debug)]
pub struct SurvivorshipTracker {
    initial: BTreeMap<u32, u32>,
    remaining: BTreeMap<u32, u32>,
    byes: BTreeMap<u32, Vec<u32>>,
    total_lives_used: u32,
}

impl SurvivorshipTracker {
    /// Initializes the ledger for the full entrant list. Called exactly once,
    /// before round 1.
    pub fn new(candidates: &[Candidate]) -> Self {
        let initial: BTreeMap<u32, u32> = candidates
            .iter()
            .map(|c| (c.id, lives_for_seed(c.seed_rank)))
            .collect();
        let remaining = initial.clone();
        let byes = candidates.iter().map(|c| (c.id, Vec::new())).collect();
        Self {
            initial,
            remaining,
            byes,
            total_lives_used: 0,
        }
    }

    pub fn lives_remaining(&self, id: u32) -> u32 {
        self.remaining.get(&id).copied().unwrap_or(0)
    }

    /// Spends a life if the candidate has one: returns true and the candidate
    /// survives the round despite losing; false means elimination.
    pub fn consume_life_if_available(&mut self, id: u32) -> bool {
        match self.remaining.get_mut(&id) {
            Some(lives) if *lives > 0 => {
                *lives -= 1;
                self.total_lives_used += 1;
                true
            }
            _ => false,
        }
    }

    pub fn record_bye(&mut self, id: u32, round_number: u32) {
        self.byes.entry(id).or_default().push(round_number);
    }

    /// Whether the candidate received a bye in the round immediately before
    /// `round_number`. Round 1 trivially has no prior bye.
    pub fn had_bye_last_round(&self, id: u32, round_number: u32) -> bool {
        if round_number <= 1 {
            return false;
        }
        self.byes
            .get(&id)
            .map(|rounds| rounds.contains(&(round_number - 1)))
            .unwrap_or(false)
    }

    pub fn total_lives_used(&self) -> u32 {
        self.total_lives_used
    }

    pub fn bye_ledger(&self) -> BTreeMap<u32, Vec<u32>> {
        self.byes.clone()
    }

    pub fn lives_ledger(&self) -> BTreeMap<u32, LivesEntry> {
        self.initial
            .iter()
            .map(|(&id, &initial)| {
                let remaining = self.lives_remaining(id);
                (
                    id,
                    LivesEntry {
                        initial,
                        used: initial - remaining,
                        remaining,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entrants(seeds: &[u32]) -> Vec<Candidate> {
        seeds
            .iter()
            .map(|&seed| Candidate {
                id: seed * 10,
                text: format!("joke {seed}"),
                overall_rating: 5.0 - seed as f64 * 0.5,
                seed_rank: seed,
            })
            .collect()
    }

    #[test]
    fn test_lives_assignment_from_seed_rank() {
        let tracker = SurvivorshipTracker::new(&entrants(&[1, 2, 3, 4, 5]));
        assert_eq!(tracker.lives_remaining(10), 3);
        assert_eq!(tracker.lives_remaining(20), 2);
        assert_eq!(tracker.lives_remaining(30), 1);
        assert_eq!(tracker.lives_remaining(40), 0);
        assert_eq!(tracker.lives_remaining(50), 0);
    }

    #[test]
    fn test_consume_life_decrements_until_exhausted() {
        let mut tracker = SurvivorshipTracker::new(&entrants(&[2]));
        assert!(tracker.consume_life_if_available(20));
        assert!(tracker.consume_life_if_available(20));
        assert!(!tracker.consume_life_if_available(20));
        assert_eq!(tracker.lives_remaining(20), 0);
        assert_eq!(tracker.total_lives_used(), 2);
    }

    #[test]
    fn test_consume_life_unknown_id_eliminates() {
        let mut tracker = SurvivorshipTracker::new(&entrants(&[1]));
        assert!(!tracker.consume_life_if_available(999));
    }

    #[test]
    fn test_bye_history_consecutive_check() {
        let mut tracker = SurvivorshipTracker::new(&entrants(&[1, 2, 3]));
        tracker.record_bye(10, 1);
        assert!(tracker.had_bye_last_round(10, 2));
        assert!(!tracker.had_bye_last_round(10, 3));
        assert!(!tracker.had_bye_last_round(20, 2));
        // Round 1 never has a prior bye.
        assert!(!tracker.had_bye_last_round(10, 1));
    }

    #[test]
    fn test_ledger_accounts_for_used_lives() {
        let mut tracker = SurvivorshipTracker::new(&entrants(&[1, 4]));
        tracker.consume_life_if_available(10);
        let ledger = tracker.lives_ledger();
        let top = &ledger[&10];
        assert_eq!((top.initial, top.used, top.remaining), (3, 1, 2));
        let other = &ledger[&40];
        assert_eq!((other.initial, other.used, other.remaining), (0, 0, 0));
    }
}
