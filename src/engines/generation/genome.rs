use rand::Rng;
use std::ops::Range;

/// Genome representation for string evolution
///
/// A chromosome is a byte string with one gene per target position. Genes are
/// drawn from printable ASCII, so a chromosome can always be shown as text.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use stringevo::engines::generation::genome::{random_chromosome, PRINTABLE_GENES};
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let chromosome = random_chromosome(5, &mut rng);
/// assert_eq!(chromosome.len(), 5);
/// assert!(chromosome.iter().all(|g| PRINTABLE_GENES.contains(g)));
/// ```
pub type Chromosome = Vec<u8>;

/// Half-open range of gene values: space through tilde, DEL excluded.
pub const PRINTABLE_GENES: Range<u8> = 32..127;

/// Uniform integer in `[min, max)`.
pub fn random_int<R: Rng>(min: usize, max: usize, rng: &mut R) -> usize {
    rng.gen_range(min..max)
}

pub fn random_gene<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(PRINTABLE_GENES)
}

/// Generate random chromosome
pub fn random_chromosome<R: Rng>(length: usize, rng: &mut R) -> Chromosome {
    (0..length).map(|_| random_gene(rng)).collect()
}
