use crate::engines::generation::candidate::{Candidate, FitnessScore};
use crate::engines::generation::genome::{random_gene, random_int, Chromosome};
use crate::error::{EvolutionError, Result};
use rand::Rng;
use std::cmp::Ordering;

/// A child mutates when a draw from `0..MUTATION_ODDS` comes up zero.
pub const MUTATION_ODDS: usize = 50;

/// Parents drawn per generation: floor(80% of the population).
pub fn parent_count(population_size: usize) -> usize {
    population_size * 4 / 5
}

/// Elites kept per generation: floor(20% of the population).
pub fn survivor_count(population_size: usize) -> usize {
    population_size / 5
}

/// Stochastic universal sampling over a fitness-sorted population.
///
/// Draws one whole-number offset in `[0, interval)` and walks `parent_count` evenly spaced
/// pointers across the cumulative fitness. Each pointer picks the first
/// candidate whose running total reaches it. A pointer past the total (float
/// drift) lands on the last candidate.
pub fn stochastic_universal_sampling<'a, S, R>(
    population: &'a [Candidate<S>],
    population_fitness: f64,
    rng: &mut R,
) -> Result<Vec<&'a Candidate<S>>>
where
    S: FitnessScore,
    R: Rng,
{
    let num_parents = parent_count(population.len());
    if num_parents == 0 {
        return Err(EvolutionError::DegeneratePopulation(format!(
            "{} candidates yield no parents",
            population.len()
        )));
    }

    let interval = population_fitness / num_parents as f64;
    // Offset is floored, so an interval below one always starts at zero
    let starting_point = if interval > 0.0 {
        (rng.gen::<f64>() * interval).floor()
    } else {
        0.0
    };

    let last = population.len() - 1;
    let mut parents = Vec::with_capacity(num_parents);
    let mut index = 0;
    let mut fitness_sum = population[0].fitness();

    // Pointers ascend, so the walk resumes where the previous one stopped
    for i in 0..num_parents {
        let point = starting_point + i as f64 * interval;
        while fitness_sum < point && index < last {
            index += 1;
            fitness_sum += population[index].fitness();
        }
        parents.push(&population[index]);
    }

    Ok(parents)
}

/// Single-point crossover: head of one parent, tail of the other
pub fn single_point_crossover(
    parent1: &[u8],
    parent2: &[u8],
    point: usize,
) -> (Chromosome, Chromosome) {
    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();

    child1[point..].copy_from_slice(&parent2[point..]);
    child2[point..].copy_from_slice(&parent1[point..]);

    (child1, child2)
}

/// Crosses adjacent pairs of the sorted population.
///
/// `num_parents` only bounds the loop: pairs are taken from population
/// indices `i, i + 1` for `i` in `(0..num_parents).step_by(2)`, not from the
/// sampled parents.
pub fn crossover<S, R>(
    num_parents: usize,
    population: &[Candidate<S>],
    target: &[u8],
    rng: &mut R,
) -> Result<Vec<Candidate<S>>>
where
    S: FitnessScore,
    R: Rng,
{
    if num_parents >= population.len() {
        return Err(EvolutionError::DegeneratePopulation(format!(
            "{} parents cannot be paired from {} candidates",
            num_parents,
            population.len()
        )));
    }

    let length = target.len();
    let mut children = Vec::with_capacity(num_parents + 1);

    for i in (0..num_parents).step_by(2) {
        // A single gene has no interior cut, children copy their parents
        let point = if length > 1 {
            random_int(1, length, rng)
        } else {
            length
        };

        let (child1, child2) = single_point_crossover(
            population[i].chromosome(),
            population[i + 1].chromosome(),
            point,
        );

        children.push(Candidate::new(child1, target));
        children.push(Candidate::new(child2, target));
    }

    Ok(children)
}

/// Mutation: each child has a 1 in `MUTATION_ODDS` chance of one random gene
/// being redrawn. Fitness is left as it was. Returns how many children were mutated.
pub fn mutate<S, R>(children: &mut [Candidate<S>], rng: &mut R) -> usize
where
    S: FitnessScore,
    R: Rng,
{
    let mut mutated = 0;

    for child in children.iter_mut() {
        if random_int(0, MUTATION_ODDS, rng) != 0 {
            continue;
        }
        let genes = child.chromosome_mut();
        if genes.is_empty() {
            continue;
        }
        let location = random_int(0, genes.len(), rng);
        genes[location] = random_gene(rng);
        mutated += 1;
    }

    mutated
}

/// Elitism: rescored copies of the top fifth of a sorted population
pub fn select_survivors<S: FitnessScore>(
    population: &[Candidate<S>],
    target: &[u8],
) -> Vec<Candidate<S>> {
    population
        .iter()
        .take(survivor_count(population.len()))
        .map(|candidate| Candidate::new(candidate.chromosome().to_vec(), target))
        .collect()
}

/// Sort descending by fitness
pub fn sort_by_fitness<S>(population: &mut [Candidate<S>])
where
    S: FitnessScore,
{
    population.sort_by(|a, b| {
        b.fitness().partial_cmp(&a.fitness()).unwrap_or(Ordering::Equal)
    });
}

pub fn total_fitness<S: FitnessScore>(population: &[Candidate<S>]) -> f64 {
    population.iter().map(Candidate::fitness).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::candidate::{Closeness, ExactMatch};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn uniform_population(size: usize) -> Vec<Candidate<ExactMatch>> {
        // Every member scores 2 against "ab"
        (0..size)
            .map(|_| Candidate::new(b"ab".to_vec(), b"ab"))
            .collect()
    }

    #[test]
    fn test_fractions_truncate() {
        assert_eq!(parent_count(10), 8);
        assert_eq!(parent_count(4), 3);
        assert_eq!(parent_count(1), 0);
        assert_eq!(survivor_count(10), 2);
        assert_eq!(survivor_count(4), 0);
        assert_eq!(survivor_count(6), 1);
    }

    #[test]
    fn test_sus_selects_in_pointer_order() {
        let target = b"aaaa";
        let mut population: Vec<Candidate<ExactMatch>> = vec![
            Candidate::new(b"aaaa".to_vec(), target),
            Candidate::new(b"aaab".to_vec(), target),
            Candidate::new(b"aabb".to_vec(), target),
            Candidate::new(b"abbb".to_vec(), target),
            Candidate::new(b"bbbb".to_vec(), target),
        ];
        sort_by_fitness(&mut population);
        let fitness = total_fitness(&population);
        let mut rng = StdRng::seed_from_u64(11);

        let parents = stochastic_universal_sampling(&population, fitness, &mut rng).unwrap();
        assert_eq!(parents.len(), 4);

        // Fitter candidates come first, so selected fitness never increases
        for pair in parents.windows(2) {
            assert!(pair[0].fitness() >= pair[1].fitness());
        }
        // Zero-fitness "bbbb" owns no band of the wheel
        assert!(parents.iter().all(|p| p.fitness() > 0.0));
    }

    #[test]
    fn test_sus_zero_fitness_picks_first() {
        let population: Vec<Candidate<ExactMatch>> = (0..5)
            .map(|_| Candidate::new(b"zz".to_vec(), b"ab"))
            .collect();
        let mut rng = StdRng::seed_from_u64(3);

        let parents = stochastic_universal_sampling(&population, 0.0, &mut rng).unwrap();
        assert_eq!(parents.len(), 4);
        assert!(parents.iter().all(|p| std::ptr::eq(*p, &population[0])));
    }

    #[test]
    fn test_sus_clamps_overrun() {
        let population = uniform_population(5);
        let mut rng = StdRng::seed_from_u64(5);

        // Claimed total well above the real one pushes pointers past the end
        let parents = stochastic_universal_sampling(&population, 1000.0, &mut rng).unwrap();
        assert_eq!(parents.len(), 4);
        assert!(std::ptr::eq(parents[3], &population[4]));
    }

    #[test]
    fn test_sus_rejects_single_candidate() {
        let population = uniform_population(1);
        let mut rng = StdRng::seed_from_u64(5);
        let result = stochastic_universal_sampling(&population, 2.0, &mut rng);
        assert!(matches!(result, Err(EvolutionError::DegeneratePopulation(_))));
    }

    fn sampled_indices(
        parents: &[&Candidate<ExactMatch>],
        population: &[Candidate<ExactMatch>],
    ) -> Vec<usize> {
        parents
            .iter()
            .map(|p| population.iter().position(|c| std::ptr::eq(c, *p)).unwrap())
            .collect()
    }

    #[test]
    fn test_sus_pointer_on_running_sum_picks_that_candidate() {
        let target = b"aa";
        let population: Vec<Candidate<ExactMatch>> = [b"aa", b"ab", b"ba", b"bb", b"bb"]
            .iter()
            .map(|g| Candidate::new(g.to_vec(), target))
            .collect();
        // Fitness 2,1,1,0,0: running sums 2,3,4,4,4
        let fitness = total_fitness(&population);
        assert_eq!(fitness, 4.0);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            // Interval is 1.0, so the floored start is 0 and pointers are 0,1,2,3
            let parents = stochastic_universal_sampling(&population, fitness, &mut rng).unwrap();
            assert_eq!(sampled_indices(&parents, &population), vec![0, 0, 0, 1]);
        }
    }

    #[test]
    fn test_sus_fractional_interval_starts_at_zero() {
        let target = b"a";
        let population: Vec<Candidate<ExactMatch>> = (0..10)
            .map(|i| Candidate::new(if i < 2 { b"a".to_vec() } else { b"b".to_vec() }, target))
            .collect();
        let fitness = total_fitness(&population);

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            // Interval 0.25: pointers 0.0..=1.0 fall on the first candidate
            let parents = stochastic_universal_sampling(&population, fitness, &mut rng).unwrap();
            let indices = sampled_indices(&parents, &population);
            assert_eq!(indices, vec![0, 0, 0, 0, 0, 1, 1, 1]);
        }
    }

    #[test]
    fn test_sus_uniform_fitness_spreads_evenly() {
        // Large scores keep the whole-number offset fine-grained
        let population: Vec<Candidate<Closeness>> = (0..10)
            .map(|_| Candidate::new(b"ab".to_vec(), b"ab"))
            .collect();
        let fitness = total_fitness(&population);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [0usize; 10];
        let trials = 2000;

        for _ in 0..trials {
            let parents = stochastic_universal_sampling(&population, fitness, &mut rng).unwrap();
            for parent in parents {
                let index = population
                    .iter()
                    .position(|c| std::ptr::eq(c, parent))
                    .unwrap();
                counts[index] += 1;
            }
        }

        // Expected 8 / 10 selections per candidate per trial
        let expected = trials as f64 * 0.8;
        for count in counts {
            let count = count as f64;
            assert!((count - expected).abs() < expected * 0.2, "count {count} vs {expected}");
        }
    }

    #[test]
    fn test_single_point_crossover() {
        let (child1, child2) = single_point_crossover(b"AAAAA", b"BBBBB", 2);
        assert_eq!(child1, b"AABBB");
        assert_eq!(child2, b"BBAAA");
    }

    #[test]
    fn test_crossover_uses_population_pairs() {
        let target = b"abcdef";
        let population: Vec<Candidate<ExactMatch>> = vec![
            Candidate::new(b"AAAAAA".to_vec(), target),
            Candidate::new(b"BBBBBB".to_vec(), target),
            Candidate::new(b"CCCCCC".to_vec(), target),
            Candidate::new(b"DDDDDD".to_vec(), target),
            Candidate::new(b"EEEEEE".to_vec(), target),
        ];
        let mut rng = StdRng::seed_from_u64(9);

        let children = crossover(4, &population, target, &mut rng).unwrap();
        assert_eq!(children.len(), 4);

        for (pair, (head, tail)) in children.chunks(2).zip([(b'A', b'B'), (b'C', b'D')]) {
            let genes = pair[0].chromosome();
            assert_eq!(genes.len(), target.len());
            let cut = genes.iter().position(|&g| g != head).unwrap();
            assert!((1..target.len()).contains(&cut));
            assert!(genes[cut..].iter().all(|&g| g == tail));

            let mirror = pair[1].chromosome();
            assert!(mirror[..cut].iter().all(|&g| g == tail));
            assert!(mirror[cut..].iter().all(|&g| g == head));
        }
    }

    #[test]
    fn test_crossover_odd_parent_count_rounds_up() {
        let population = uniform_population(4);
        let mut rng = StdRng::seed_from_u64(1);
        let children = crossover(3, &population, b"ab", &mut rng).unwrap();
        assert_eq!(children.len(), 4);
    }

    #[test]
    fn test_crossover_single_gene_copies_parents() {
        let target = b"x";
        let population: Vec<Candidate<Closeness>> = vec![
            Candidate::new(b"a".to_vec(), target),
            Candidate::new(b"b".to_vec(), target),
            Candidate::new(b"c".to_vec(), target),
        ];
        let mut rng = StdRng::seed_from_u64(4);
        let children = crossover(2, &population, target, &mut rng).unwrap();
        assert_eq!(children[0].chromosome(), b"a");
        assert_eq!(children[1].chromosome(), b"b");
    }

    #[test]
    fn test_mutation_rate_and_extent() {
        let target = b"hello world";
        let mut rng = StdRng::seed_from_u64(77);
        let trials = 50_000;
        let mut children: Vec<Candidate<Closeness>> = (0..trials)
            .map(|_| Candidate::new(target.to_vec(), target))
            .collect();

        let mutated = mutate(&mut children, &mut rng);

        let rate = mutated as f64 / trials as f64;
        assert!((rate - 1.0 / MUTATION_ODDS as f64).abs() < 0.005, "rate {rate}");

        let changed = children
            .iter()
            .filter(|c| c.chromosome() != target)
            .count();
        assert!(changed <= mutated);
        for child in &children {
            let diff = child
                .chromosome()
                .iter()
                .zip(target)
                .filter(|(a, b)| a != b)
                .count();
            assert!(diff <= 1);
            assert_eq!(child.fitness(), Closeness::GENE_RANGE * target.len() as f64);
        }
    }

    #[test]
    fn test_survivors_are_rescored_top_fifth() {
        let target = b"aaaa";
        let mut population: Vec<Candidate<ExactMatch>> = (0..10)
            .map(|i| {
                let mut genes = b"bbbb".to_vec();
                for gene in genes.iter_mut().take(i % 5) {
                    *gene = b'a';
                }
                Candidate::new(genes, target)
            })
            .collect();
        sort_by_fitness(&mut population);

        // Stale score on the leader must not carry over
        population[0].chromosome_mut()[0] = b'z';

        let survivors = select_survivors(&population, target);
        assert_eq!(survivors.len(), 2);
        assert_eq!(survivors[0].chromosome(), population[0].chromosome());
        assert_eq!(survivors[0].fitness(), 3.0);
        assert_eq!(survivors[1].fitness(), 4.0);
    }

    #[test]
    fn test_sort_descending() {
        let target = b"abc";
        let mut population: Vec<Candidate<ExactMatch>> = [b"xxx", b"abc", b"axx", b"abx"]
            .iter()
            .map(|g| Candidate::new(g.to_vec(), target))
            .collect();
        sort_by_fitness(&mut population);
        let scores: Vec<f64> = population.iter().map(Candidate::fitness).collect();
        assert_eq!(scores, vec![3.0, 2.0, 1.0, 0.0]);
        assert_eq!(total_fitness(&population), 6.0);
    }
}
