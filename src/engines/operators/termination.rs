use super::traits::TerminationCondition;
use crate::engines::genetics::{Gene, Population};
use crate::engines::process::ProcessInformation;
use crate::error::Result;
use crate::types::Fitness;

/// Stops once the fittest individual reaches `target`.
#[derive(Debug, Clone, Copy)]
pub struct FitnessThreshold {
    target: Fitness,
}

impl FitnessThreshold {
    pub fn new(target: Fitness) -> Self {
        Self { target }
    }

    pub fn target(&self) -> Fitness {
        self.target
    }
}

impl<G: Gene> TerminationCondition<G> for FitnessThreshold {
    fn should_terminate(&self, population: &Population<G>, _process: &ProcessInformation) -> Result<bool> {
        Ok(population.fittest()?.fitness >= self.target)
    }
}

/// Stops once the generation counter reaches `max_generations`.
#[derive(Debug, Clone, Copy)]
pub struct GenerationCount {
    max_generations: u64,
}

impl GenerationCount {
    pub fn new(max_generations: u64) -> Self {
        Self { max_generations }
    }

    pub fn max_generations(&self) -> u64 {
        self.max_generations
    }
}

impl<G: Gene> TerminationCondition<G> for GenerationCount {
    fn should_terminate(&self, _population: &Population<G>, process: &ProcessInformation) -> Result<bool> {
        Ok(process.generation >= self.max_generations)
    }
}
