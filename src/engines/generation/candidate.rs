use crate::engines::generation::genome::Chromosome;
use std::borrow::Cow;
use std::marker::PhantomData;

/// Scores a chromosome against the target.
///
/// `GENE_RANGE` is the most a single gene position can contribute, so a
/// chromosome of length `L` scores at most `GENE_RANGE * L`, and only an exact
/// match reaches that bound.
pub trait FitnessScore {
    const GENE_RANGE: f64;

    fn score(chromosome: &[u8], target: &[u8]) -> f64;
}

/// Partial credit for genes near their target byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct Closeness;

impl FitnessScore for Closeness {
    const GENE_RANGE: f64 = 95.0;

    fn score(chromosome: &[u8], target: &[u8]) -> f64 {
        chromosome
            .iter()
            .zip(target)
            .map(|(gene, goal)| (Self::GENE_RANGE - f64::from(gene.abs_diff(*goal))).max(0.0))
            .sum()
    }
}

/// One point per gene equal to its target byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl FitnessScore for ExactMatch {
    const GENE_RANGE: f64 = 1.0;

    fn score(chromosome: &[u8], target: &[u8]) -> f64 {
        chromosome
            .iter()
            .zip(target)
            .filter(|(gene, goal)| gene == goal)
            .count() as f64
    }
}

/// A chromosome paired with the fitness it had when constructed.
///
/// Fitness is computed once. Writing through [`Candidate::chromosome_mut`]
/// leaves it untouched, so a mutated candidate keeps its old score until it is
/// rebuilt from its chromosome.
#[derive(Debug, Clone)]
pub struct Candidate<S = Closeness> {
    chromosome: Chromosome,
    fitness: f64,
    scoring: PhantomData<fn() -> S>,
}

impl<S: FitnessScore> Candidate<S> {
    pub fn new(chromosome: Chromosome, target: &[u8]) -> Self {
        let fitness = S::score(&chromosome, target);
        Self {
            chromosome,
            fitness,
            scoring: PhantomData,
        }
    }

    pub fn chromosome(&self) -> &[u8] {
        &self.chromosome
    }

    pub fn chromosome_mut(&mut self) -> &mut [u8] {
        &mut self.chromosome
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.chromosome)
    }
}
