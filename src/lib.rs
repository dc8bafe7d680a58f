pub mod config;
pub mod engines;
pub mod error;

pub use engines::generation::{
    Candidate, Closeness, ExactMatch, FitnessScore, GeneticAlgorithm, Runner, RunReport,
};
pub use error::{EvolutionError, Result};
