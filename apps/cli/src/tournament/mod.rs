//! Tournament phase: reduces the rated top-N to a single winner through
//! pairwise LLM duels with a lives/bye survivorship system.
//!
//! Pieces, leaves first: `oracle` (the external comparator behind a trait),
//! `judge` (double-query bias cancellation and conflict resolution),
//! `survivorship` (lives/bye ledger), `bracket` (seeded pairing), `engine`
//! (the round loop and final rankings).

pub mod bracket;
pub mod engine;
pub mod judge;
pub mod models;
pub mod oracle;
pub mod prompts;
pub mod survivorship;

pub use engine::TournamentEngine;
pub use judge::PairwiseJudge;
pub use models::{Candidate, TournamentResult};
pub use oracle::{ComparatorOracle, LlmComparator};
