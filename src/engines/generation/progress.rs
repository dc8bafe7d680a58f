use super::candidate::{Candidate, FitnessScore};

pub trait GenerationObserver: Send {
    fn on_generation_complete(
        &mut self,
        generation: usize,
        best_fitness: f64,
        population_fitness: f64,
        population_len: usize,
    );

    fn on_solution_found<S: FitnessScore>(&mut self, generation: usize, best: &Candidate<S>);
}

/// Reports progress through the `log` facade
pub struct LogProgress {
    log_every: usize,
}

impl LogProgress {
    pub fn new(log_every: usize) -> Self {
        Self { log_every: log_every.max(1) }
    }
}

impl GenerationObserver for LogProgress {
    fn on_generation_complete(
        &mut self,
        generation: usize,
        best_fitness: f64,
        population_fitness: f64,
        population_len: usize,
    ) {
        if generation % self.log_every == 0 {
            log::info!(
                "Generation {}: best fitness {:.1}, total {:.1} over {} candidates",
                generation, best_fitness, population_fitness, population_len
            );
        }
    }

    fn on_solution_found<S: FitnessScore>(&mut self, generation: usize, best: &Candidate<S>) {
        log::info!("Solved at generation {}: {:?}", generation, best.as_text());
    }
}

pub struct NoopProgress;

impl GenerationObserver for NoopProgress {
    fn on_generation_complete(&mut self, _: usize, _: f64, _: f64, _: usize) {}

    fn on_solution_found<S: FitnessScore>(&mut self, _: usize, _: &Candidate<S>) {}
}
