use super::traits::MatingFunction;
use crate::engines::genetics::{Chromosome, Gene, Individual};
use crate::error::{GeneCoreError, Result};
use rand::seq::index;
use rand::{Rng, RngCore};

fn parent_genomes<'a, G: Gene>(parents: &[&'a Individual<G>]) -> Result<Vec<&'a [G]>> {
    parents.iter().map(|&parent| parent.genome()).collect()
}

fn shortest_length<G>(genomes: &[&[G]]) -> Result<usize> {
    genomes
        .iter()
        .map(|genome| genome.len())
        .min()
        .ok_or(GeneCoreError::InsufficientParents {
            required: 1,
            available: 0,
        })
}

/// Index of a random parent, never `previous`.
fn choose_parent(parent_count: usize, previous: Option<usize>, rng: &mut dyn RngCore) -> usize {
    match previous {
        Some(previous) if parent_count > 1 => {
            let choice = rng.gen_range(0..parent_count - 1);
            if choice >= previous {
                choice + 1
            } else {
                choice
            }
        }
        _ => rng.gen_range(0..parent_count),
    }
}

/// Multi-point crossover.
///
/// Cut points split the offspring genome into segments; each segment is copied
/// from a randomly chosen parent, never the same parent twice in a row. The
/// offspring is as long as the shortest parent.
#[derive(Debug, Clone, Copy)]
pub struct CrossOverMatingFunction {
    crossover_points: usize,
}

impl CrossOverMatingFunction {
    pub fn new(crossover_points: usize) -> Self {
        Self { crossover_points }
    }

    pub fn single_point() -> Self {
        Self::new(1)
    }

    pub fn crossover_points(&self) -> usize {
        self.crossover_points
    }
}

/// Build one offspring from `parents` using the given ascending cut points.
///
/// Points must lie inside the shortest parent genome. Empty segments are
/// allowed (a cut at 0 or two equal cuts) and still count as a turn.
pub fn crossover_with_points<G: Gene>(
    parents: &[&Individual<G>],
    points: &[usize],
    rng: &mut dyn RngCore,
) -> Result<Individual<G>> {
    let genomes = parent_genomes(parents)?;
    let length = shortest_length(&genomes)?;

    if !points.is_empty() && genomes.len() < 2 {
        return Err(GeneCoreError::InsufficientParents {
            required: 2,
            available: genomes.len(),
        });
    }
    if let Some(&bad) = points.iter().find(|&&point| point >= length) {
        return Err(GeneCoreError::InvalidArgument(format!(
            "crossover point {} outside genome of length {}",
            bad, length
        )));
    }
    if points.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(GeneCoreError::InvalidArgument(
            "crossover points must be ascending".to_string(),
        ));
    }

    let mut offspring_genes = Vec::with_capacity(length);
    let mut previous_parent = None;
    let mut segment_start = 0;

    for &segment_end in points.iter().chain(std::iter::once(&length)) {
        let parent = choose_parent(genomes.len(), previous_parent, rng);
        previous_parent = Some(parent);

        offspring_genes.extend_from_slice(&genomes[parent][segment_start..segment_end]);
        segment_start = segment_end;
    }

    Individual::with_chromosome(Chromosome::from_genes(offspring_genes)?)
}

impl<G: Gene> MatingFunction<G> for CrossOverMatingFunction {
    fn mate(&self, parents: &[&Individual<G>], rng: &mut dyn RngCore) -> Result<Individual<G>> {
        let genomes = parent_genomes(parents)?;
        let length = shortest_length(&genomes)?;

        if self.crossover_points > length {
            return Err(GeneCoreError::InsufficientCrossoverPoints {
                requested: self.crossover_points,
                available: length,
            });
        }

        let mut points = index::sample(&mut *rng, length, self.crossover_points).into_vec();
        points.sort_unstable();

        crossover_with_points(parents, &points, rng)
    }
}

/// Uniform recombination: every gene position is copied from an independently
/// chosen random parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCombinationMatingFunction {
    offspring_length: Option<usize>,
}

impl RandomCombinationMatingFunction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed offspring length instead of the shortest parent's.
    pub fn with_length(offspring_length: usize) -> Self {
        Self {
            offspring_length: Some(offspring_length),
        }
    }
}

impl<G: Gene> MatingFunction<G> for RandomCombinationMatingFunction {
    fn mate(&self, parents: &[&Individual<G>], rng: &mut dyn RngCore) -> Result<Individual<G>> {
        if parents.len() < 2 {
            return Err(GeneCoreError::InsufficientParents {
                required: 2,
                available: parents.len(),
            });
        }

        let genomes = parent_genomes(parents)?;
        let shortest = shortest_length(&genomes)?;
        let length = self.offspring_length.unwrap_or(shortest);

        if length > shortest {
            return Err(GeneCoreError::InvalidArgument(format!(
                "offspring length {} exceeds shortest parent genome {}",
                length, shortest
            )));
        }

        let offspring_genes = (0..length)
            .map(|position| genomes[rng.gen_range(0..genomes.len())][position].clone())
            .collect();

        Individual::with_chromosome(Chromosome::from_genes(offspring_genes)?)
    }
}
