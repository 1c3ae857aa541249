//! Batch rating: rates jokes in bounded concurrent batches.
//!
//! Batches bound concurrent LLM fan-out; a short pause between batches keeps
//! rate limiters happy. Jokes whose evaluation panics are logged and skipped
//! rather than aborting the run.

use std::time::{Duration, Instant};

use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::generator::models::GeneratedJoke;
use crate::judges::models::RatingResult;
use crate::judges::rating::RatingJudge;

const INTER_BATCH_DELAY: Duration = Duration::from_secs(1);

pub struct BatchProcessor {
    judge: RatingJudge,
    batch_size: usize,
}

impl BatchProcessor {
    pub fn new(judge: RatingJudge, batch_size: usize) -> Self {
        Self {
            judge,
            batch_size: batch_size.max(1),
        }
    }

    pub async fn process_all(&self, jokes: &[GeneratedJoke]) -> Vec<RatingResult> {
        if jokes.is_empty() {
            return Vec::new();
        }

        let started = Instant::now();
        let total = jokes.len();
        let batches = total.div_ceil(self.batch_size);
        info!(total, batch_size = self.batch_size, batches, "rating phase starting");

        let mut results: Vec<RatingResult> = Vec::with_capacity(total);
        let mut failed: usize = 0;

        for (batch_index, batch) in jokes.chunks(self.batch_size).enumerate() {
            info!(batch = batch_index + 1, of = batches, jokes = batch.len(), "processing batch");

            let mut set = JoinSet::new();
            for joke in batch {
                let judge = self.judge.clone();
                let joke = joke.clone();
                set.spawn(async move { judge.evaluate(&joke).await });
            }

            while let Some(joined) = set.join_next().await {
                match joined {
                    Ok(result) => {
                        log_result(&result);
                        results.push(result);
                    }
                    Err(e) => {
                        failed += 1;
                        warn!("joke evaluation task failed: {e}");
                    }
                }
            }

            if (batch_index + 1) * self.batch_size < total {
                tokio::time::sleep(INTER_BATCH_DELAY).await;
            }
        }

        // Deterministic report order regardless of task completion order.
        results.sort_by_key(|r| r.joke_id);

        let admissible = results
            .iter()
            .filter(|r| r.admissibility.is_admissible())
            .count();
        info!(
            rated = results.len(),
            admissible,
            failed,
            elapsed_secs = started.elapsed().as_secs(),
            "rating phase complete"
        );

        results
    }
}

fn log_result(result: &RatingResult) {
    if result.admissibility.is_admissible() {
        info!(
            joke = result.joke_id,
            rating = result.overall_rating,
            max = result.max_score,
            categories = %result.assigned_categories.join(", "),
            "joke rated"
        );
    } else {
        info!(
            joke = result.joke_id,
            failed = %result.admissibility.failed_checks().join(", "),
            "joke inadmissible"
        );
    }
}
