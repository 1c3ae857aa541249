use serde::{Deserialize, Serialize};

/// A first-order comedic seed: a hook anchored to the topic, a compatible
/// joke template, and the strategy for combining them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedTriplet {
    pub hook: String,
    pub template: String,
    pub explanation: String,
}

/// A higher-order group: 2-4 seed triplets that work better together than
/// apart, plus the combined strategy.
#[derive(Debug, Clone, Serialize)]
pub struct SeedGroup {
    pub triplets: Vec<SeedTriplet>,
    pub explanation: String,
}

/// A generated joke. Ids are assigned sequentially once the full set is
/// collected, after fan-out completes.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedJoke {
    pub id: u32,
    pub text: String,
}

/// Everything the generation phase produced, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationArtifacts {
    pub topics: Vec<String>,
    pub seeds: Vec<SeedTriplet>,
    pub groups: Vec<SeedGroup>,
    pub jokes: Vec<GeneratedJoke>,
}
