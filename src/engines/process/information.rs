use crate::engines::genetics::{Gene, Population};
use crate::error::Result;
use crate::types::Fitness;
use serde::{Deserialize, Serialize};

/// Summary of one completed generation.
///
/// Each delta is measured against the previous snapshot. The first snapshot of
/// a run has no predecessor, so its deltas equal the raw values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInformation {
    pub generation: u64,
    pub total_fitness: Fitness,
    pub fittest_fitness: Fitness,
    /// Mean fitness of the N fittest individuals.
    pub fittest_n_fitness: Fitness,
    pub total_fitness_delta: Fitness,
    pub fittest_fitness_delta: Fitness,
    pub fittest_n_fitness_delta: Fitness,
}

/// Builds the snapshot for the generation that just finished.
pub trait ProcessInformationComposer<G: Gene>: Send {
    fn compose(&self, previous: Option<&ProcessInformation>, population: &Population<G>) -> Result<ProcessInformation>;
}

/// Composer averaging the `fittest_n` best individuals, clamped to the
/// population size.
#[derive(Debug, Clone, Copy)]
pub struct FittestComposer {
    fittest_n: usize,
}

impl FittestComposer {
    pub const DEFAULT_FITTEST_N: usize = 3;

    pub fn new(fittest_n: usize) -> Self {
        Self {
            fittest_n: fittest_n.max(1),
        }
    }

    pub fn fittest_n(&self) -> usize {
        self.fittest_n
    }
}

impl Default for FittestComposer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FITTEST_N)
    }
}

impl<G: Gene> ProcessInformationComposer<G> for FittestComposer {
    fn compose(&self, previous: Option<&ProcessInformation>, population: &Population<G>) -> Result<ProcessInformation> {
        let ranked = population.population_by_fitness()?;
        let fittest_fitness = population.fittest()?.fitness;
        let total_fitness: Fitness = ranked.iter().map(|scored| scored.fitness).sum();

        let window = self.fittest_n.min(ranked.len());
        let fittest_n_fitness = population
            .n_fittest(window)?
            .iter()
            .map(|scored| scored.fitness)
            .sum::<Fitness>()
            / window as Fitness;

        let (generation, previous_total, previous_fittest, previous_fittest_n) = match previous {
            Some(last) => (
                last.generation + 1,
                last.total_fitness,
                last.fittest_fitness,
                last.fittest_n_fitness,
            ),
            None => (1, 0.0, 0.0, 0.0),
        };

        Ok(ProcessInformation {
            generation,
            total_fitness,
            fittest_fitness,
            fittest_n_fitness,
            total_fitness_delta: total_fitness - previous_total,
            fittest_fitness_delta: fittest_fitness - previous_fittest,
            fittest_n_fitness_delta: fittest_n_fitness - previous_fittest_n,
        })
    }
}
