pub mod genome;
pub mod candidate;
pub mod operators;
pub mod evolution_engine;
pub mod progress;
pub mod runner;

pub use genome::Chromosome;
pub use candidate::{Candidate, Closeness, ExactMatch, FitnessScore};
pub use evolution_engine::GeneticAlgorithm;
pub use progress::{GenerationObserver, LogProgress, NoopProgress};
pub use runner::{Runner, RunReport};
