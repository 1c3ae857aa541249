use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One admissibility gate's outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissibilityCheck {
    pub passed: bool,
    pub reasoning: String,
}

/// The five admissibility gates. All must pass for a joke to be rated.
#[derive(Debug, Clone, Serialize)]
pub struct AdmissibilityReport {
    pub intent: AdmissibilityCheck,
    pub completeness: AdmissibilityCheck,
    pub appropriateness: AdmissibilityCheck,
    pub coherence: AdmissibilityCheck,
    pub accessibility: AdmissibilityCheck,
}

impl AdmissibilityReport {
    pub fn is_admissible(&self) -> bool {
        self.intent.passed
            && self.completeness.passed
            && self.appropriateness.passed
            && self.coherence.passed
            && self.accessibility.passed
    }

    /// Names of the gates that failed, for log lines and reports.
    pub fn failed_checks(&self) -> Vec<&'static str> {
        let mut failed = Vec::new();
        if !self.intent.passed {
            failed.push("intent");
        }
        if !self.completeness.passed {
            failed.push("completeness");
        }
        if !self.appropriateness.passed {
            failed.push("appropriateness");
        }
        if !self.coherence.passed {
            failed.push("coherence");
        }
        if !self.accessibility.passed {
            failed.push("accessibility");
        }
        failed
    }
}

/// Full rating-phase result for one joke.
#[derive(Debug, Clone, Serialize)]
pub struct RatingResult {
    pub joke_id: u32,
    pub joke_text: String,
    pub admissibility: AdmissibilityReport,
    pub assigned_categories: Vec<String>,
    /// Categories assigned by classification but dropped because no factor
    /// applied.
    pub dropped_categories: Vec<String>,
    pub factor_scores: BTreeMap<String, u8>,
    pub max_score: u8,
    pub mean_score: f64,
    /// `(max*10 + mean + n/5) / 12`, normalized below 5 with a small bonus
    /// for engaging more factors.
    pub overall_rating: f64,
}

impl RatingResult {
    /// An inadmissible joke never reaches scoring; everything stays zeroed.
    pub fn inadmissible(joke_id: u32, joke_text: String, admissibility: AdmissibilityReport) -> Self {
        Self {
            joke_id,
            joke_text,
            admissibility,
            assigned_categories: Vec::new(),
            dropped_categories: Vec::new(),
            factor_scores: BTreeMap::new(),
            max_score: 0,
            mean_score: 0.0,
            overall_rating: 0.0,
        }
    }
}
