use crate::engines::generation::{
    candidate::{Candidate, Closeness, FitnessScore},
    genome::{random_chromosome, PRINTABLE_GENES},
    operators::{
        crossover, mutate, select_survivors, sort_by_fitness, stochastic_universal_sampling,
        total_fitness,
    },
};
use crate::error::{EvolutionError, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Generational search for a fixed target string.
///
/// Owns the population (kept sorted by descending fitness) and its total
/// fitness, and replaces both on every [`compute_generation`] call.
///
/// [`compute_generation`]: GeneticAlgorithm::compute_generation
pub struct GeneticAlgorithm<S = Closeness, R = StdRng> {
    solution: Vec<u8>,
    population: Vec<Candidate<S>>,
    population_fitness: f64,
    generation: usize,
    rng: R,
}

impl<S: FitnessScore> GeneticAlgorithm<S, StdRng> {
    /// Engine seeded from OS entropy. An odd `population_size` is bumped to even.
    pub fn new(population_size: usize, solution: &str) -> Result<Self> {
        Self::with_rng(population_size, solution, StdRng::from_entropy())
    }

    pub fn with_seed(population_size: usize, solution: &str, seed: u64) -> Result<Self> {
        Self::with_rng(population_size, solution, StdRng::seed_from_u64(seed))
    }
}

impl<S: FitnessScore, R: Rng> GeneticAlgorithm<S, R> {
    pub fn with_rng(population_size: usize, solution: &str, mut rng: R) -> Result<Self> {
        if population_size == 0 {
            return Err(EvolutionError::InvalidPopulationSize(population_size));
        }
        let solution = solution.as_bytes().to_vec();
        if solution.is_empty() {
            return Err(EvolutionError::EmptyTarget);
        }
        if let Some((position, &byte)) = solution
            .iter()
            .enumerate()
            .find(|(_, b)| !PRINTABLE_GENES.contains(*b))
        {
            return Err(EvolutionError::InvalidTarget { position, byte });
        }

        let population_size = population_size + population_size % 2;
        let population = Self::generate_population(population_size, &solution, &mut rng);
        let mut engine = Self {
            solution,
            population,
            population_fitness: 0.0,
            generation: 0,
            rng,
        };
        engine.rebuild();

        log::debug!(
            "Bootstrapped {} candidates for a {}-byte target, total fitness {:.1}",
            engine.population.len(),
            engine.solution.len(),
            engine.population_fitness
        );

        Ok(engine)
    }

    fn generate_population(size: usize, solution: &[u8], rng: &mut R) -> Vec<Candidate<S>> {
        (0..size)
            .map(|_| Candidate::new(random_chromosome(solution.len(), rng), solution))
            .collect()
    }

    /// Recompute the total and restore descending order
    fn rebuild(&mut self) {
        self.population_fitness = total_fitness(&self.population);
        sort_by_fitness(&mut self.population);
    }

    /// Run one generation; `Ok(true)` once any candidate scores the maximum.
    pub fn compute_generation(&mut self) -> Result<bool> {
        let num_parents =
            stochastic_universal_sampling(&self.population, self.population_fitness, &mut self.rng)?
                .len();
        let mut children = crossover(num_parents, &self.population, &self.solution, &mut self.rng)?;
        let mutated = mutate(&mut children, &mut self.rng);
        let survivors = select_survivors(&self.population, &self.solution);

        let child_count = children.len();
        children.extend(survivors);
        self.population = children;
        self.rebuild();
        self.generation += 1;

        let max_fitness = self.max_fitness();
        let solved = self.population.iter().any(|c| c.fitness() >= max_fitness);

        log::debug!(
            "Generation {}: {} children ({} mutated), {} survivors, best {:.1}/{:.1}",
            self.generation,
            child_count,
            mutated,
            self.population.len() - child_count,
            self.best().fitness(),
            max_fitness
        );

        Ok(solved)
    }

    pub fn solution(&self) -> &[u8] {
        &self.solution
    }

    pub fn population(&self) -> &[Candidate<S>] {
        &self.population
    }

    pub fn population_fitness(&self) -> f64 {
        self.population_fitness
    }

    /// Highest-ranked candidate
    pub fn best(&self) -> &Candidate<S> {
        // Never empty: construction requires at least two members and every
        // generation yields at least one crossed pair
        &self.population[0]
    }

    pub fn max_fitness(&self) -> f64 {
        S::GENE_RANGE * self.solution.len() as f64
    }

    /// Completed generations
    pub fn generation(&self) -> usize {
        self.generation
    }
}
