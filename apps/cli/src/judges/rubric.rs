//! Rating rubric: categories, their factors, and calibration examples.
//!
//! Ships with a built-in default; a JSON file with the same shape can
//! override it via `--rubric`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub positive_examples: Vec<String>,
    #[serde(default)]
    pub negative_examples: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub factors: Vec<Factor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    pub categories: Vec<Category>,
    pub good_examples: Vec<String>,
    pub bad_examples: Vec<String>,
}

impl Rubric {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading rubric file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing rubric file {}", path.display()))
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Every factor across all categories, for the Independent path.
    pub fn all_factors(&self) -> Vec<&Factor> {
        self.categories
            .iter()
            .flat_map(|c| c.factors.iter())
            .collect()
    }
}

impl Default for Rubric {
    fn default() -> Self {
        let factor = |name: &str, description: &str, good: &[&str], bad: &[&str]| Factor {
            name: name.to_string(),
            description: description.to_string(),
            positive_examples: good.iter().map(|s| s.to_string()).collect(),
            negative_examples: bad.iter().map(|s| s.to_string()).collect(),
        };

        Rubric {
            categories: vec![
                Category {
                    name: "Wordplay".to_string(),
                    factors: vec![
                        factor(
                            "pun_quality",
                            "The double meaning lands cleanly and both readings make sense",
                            &["I used to be a banker but I lost interest."],
                            &["I like cheese because cheese is a word."],
                        ),
                        factor(
                            "phonetic_surprise",
                            "Sound similarity produces an unexpected second reading",
                            &["Velcro: what a rip-off."],
                            &["Cats are called cats because they are cats."],
                        ),
                    ],
                },
                Category {
                    name: "Observational".to_string(),
                    factors: vec![
                        factor(
                            "relatability",
                            "Points at a shared experience the audience instantly recognizes",
                            &["My bed is a magical place where I suddenly remember everything I forgot to do."],
                            &["Sometimes things happen during the day."],
                        ),
                        factor(
                            "specificity",
                            "Concrete detail makes the observation sharper than a generic complaint",
                            &["There are two kinds of people: those who can extrapolate from incomplete data"],
                            &["People do things differently from each other."],
                        ),
                    ],
                },
                Category {
                    name: "Absurdist".to_string(),
                    factors: vec![
                        factor(
                            "commitment",
                            "The absurd premise is followed to a consistent, escalating conclusion",
                            &["I have a fear of speed bumps, but I am slowly getting over it."],
                            &["A purple elephant. That is the joke."],
                        ),
                        factor(
                            "internal_logic",
                            "The impossible world still obeys its own rules",
                            &["Time flies like an arrow; fruit flies like a banana."],
                            &["Random words spaghetti doorknob."],
                        ),
                    ],
                },
                Category {
                    name: "Structural".to_string(),
                    factors: vec![
                        factor(
                            "misdirection",
                            "The setup plants an expectation the punchline cleanly subverts",
                            &["I want to die peacefully in my sleep like my grandfather, not screaming like his passengers."],
                            &["I went to the store. The store was closed. That was bad."],
                        ),
                        factor(
                            "economy",
                            "No wasted words; the punchline arrives at the last possible moment",
                            &["For sale: parachute. Used once, never opened."],
                            &["So anyway, to make a long story short, and I am skipping a lot here..."],
                        ),
                    ],
                },
            ],
            good_examples: vec![
                "I told my wife she should embrace her mistakes. She hugged me.".to_string(),
                "Parallel lines have so much in common. It's a shame they'll never meet.".to_string(),
                "I'm reading a book about anti-gravity. It's impossible to put down.".to_string(),
            ],
            bad_examples: vec![
                "Why did the chicken cross the road? Because it wanted to. That is all.".to_string(),
                "Here is a funny joke about dogs: dogs are animals that bark.".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rubric_has_factors_everywhere() {
        let rubric = Rubric::default();
        assert!(!rubric.categories.is_empty());
        for category in &rubric.categories {
            assert!(
                !category.factors.is_empty(),
                "category {} has no factors",
                category.name
            );
        }
        assert!(!rubric.good_examples.is_empty());
        assert!(!rubric.bad_examples.is_empty());
    }

    #[test]
    fn test_category_lookup_is_case_insensitive() {
        let rubric = Rubric::default();
        assert!(rubric.category("wordplay").is_some());
        assert!(rubric.category("WORDPLAY").is_some());
        assert!(rubric.category("no-such-category").is_none());
    }

    #[test]
    fn test_all_factors_flattens_categories() {
        let rubric = Rubric::default();
        let expected: usize = rubric.categories.iter().map(|c| c.factors.len()).sum();
        assert_eq!(rubric.all_factors().len(), expected);
    }

    #[test]
    fn test_rubric_round_trips_through_json() {
        let rubric = Rubric::default();
        let json = serde_json::to_string(&rubric).unwrap();
        let parsed: Rubric = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.categories.len(), rubric.categories.len());
    }
}
