//! Run reports: serializes each phase's artifacts into a timestamped
//! directory as pretty-printed JSON.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::generator::models::GenerationArtifacts;
use crate::judges::models::RatingResult;
use crate::tournament::{Candidate, TournamentResult};

pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Creates `<base>/run_<timestamp>/` and writes all reports there.
    pub fn create(base: &Path) -> Result<Self, AppError> {
        let dir = base.join(format!("run_{}", Local::now().format("%Y%m%d_%H%M%S")));
        fs::create_dir_all(&dir)?;
        info!(dir = %dir.display(), "report directory created");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write_generation(&self, artifacts: &GenerationArtifacts) -> Result<(), AppError> {
        self.write_json("generated_jokes.json", artifacts)
    }

    pub fn write_ratings(&self, ratings: &[RatingResult]) -> Result<(), AppError> {
        self.write_json("rating_results.json", &ratings)
    }

    pub fn write_top_candidates(&self, top: &[Candidate]) -> Result<(), AppError> {
        self.write_json("top_candidates.json", &top)
    }

    pub fn write_tournament(&self, result: &TournamentResult) -> Result<(), AppError> {
        self.write_json("tournament_result.json", result)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), AppError> {
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)?;
        info!(file = %path.display(), "report written");
        Ok(())
    }
}
