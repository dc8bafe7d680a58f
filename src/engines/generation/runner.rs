use super::{
    candidate::FitnessScore,
    evolution_engine::GeneticAlgorithm,
    progress::GenerationObserver,
};
use crate::error::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Summary of one run, serialisable for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub target: String,
    pub solved: bool,
    pub generations: usize,
    pub best_chromosome: String,
    pub best_fitness: f64,
    pub max_fitness: f64,
    pub population_len: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drives an engine until it solves or the generation budget runs out.
pub struct Runner {
    max_generations: usize,
}

impl Runner {
    pub fn new(max_generations: usize) -> Self {
        Self { max_generations }
    }

    pub fn run<S, R, O>(&self, engine: &mut GeneticAlgorithm<S, R>, observer: &mut O) -> Result<RunReport>
    where
        S: FitnessScore,
        R: Rng,
        O: GenerationObserver,
    {
        let started_at = Utc::now();
        let mut solved = false;

        while engine.generation() < self.max_generations {
            solved = engine.compute_generation()?;
            observer.on_generation_complete(
                engine.generation(),
                engine.best().fitness(),
                engine.population_fitness(),
                engine.population().len(),
            );
            if solved {
                observer.on_solution_found(engine.generation(), engine.best());
                break;
            }
        }

        if !solved {
            log::warn!(
                "No exact match after {} generations, best {:?}",
                engine.generation(),
                engine.best().as_text()
            );
        }

        let best = engine.best();
        Ok(RunReport {
            target: String::from_utf8_lossy(engine.solution()).into_owned(),
            solved,
            generations: engine.generation(),
            best_chromosome: best.as_text().into_owned(),
            best_fitness: best.fitness(),
            max_fitness: engine.max_fitness(),
            population_len: engine.population().len(),
            started_at,
            finished_at: Utc::now(),
        })
    }
}
