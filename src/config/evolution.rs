use super::traits::ConfigSection;
use crate::engines::generation::genome::PRINTABLE_GENES;
use crate::error::EvolutionError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub target: String,
    pub max_generations: usize,
    pub scoring: ScoringMethod,
    pub seed: Option<u64>,
    pub log_every: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    /// Partial credit for genes close to the target byte
    Closeness,
    /// One point per exactly matching gene
    ExactMatch,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            target: "Hello, World!".to_string(),
            max_generations: 5000,
            scoring: ScoringMethod::Closeness,
            seed: None,
            log_every: 100,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), EvolutionError> {
        if self.population_size == 0 {
            return Err(EvolutionError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.target.is_empty() {
            return Err(EvolutionError::Configuration("Target must not be empty".to_string()));
        }
        if let Some((position, byte)) = self
            .target
            .bytes()
            .enumerate()
            .find(|(_, b)| !PRINTABLE_GENES.contains(b))
        {
            return Err(EvolutionError::Configuration(format!(
                "Target byte {} at position {} is not printable ASCII",
                byte, position
            )));
        }
        if self.max_generations == 0 {
            return Err(EvolutionError::Configuration(
                "Generation budget must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
