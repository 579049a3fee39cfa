use super::traits::ConfigSection;
use crate::error::GeneCoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    pub population_size: usize,
    pub chromosome_length: usize,
    pub parents_per_child: usize,
    /// Parent groups per generation. One means the single fittest group.
    pub pair_count: usize,
    /// Only used when `pair_count` is above one.
    pub tournament_size: usize,
    pub crossover_points: usize,
    pub mutation_rate: f64,
    pub fittest_n: usize,
    pub target_fitness: Option<f64>,
    pub max_generations: Option<u64>,
    pub seed: Option<u64>,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            chromosome_length: 100,
            parents_per_child: 2,
            pair_count: 10,
            tournament_size: 3,
            crossover_points: 1,
            mutation_rate: 0.005,
            fittest_n: 3,
            target_fitness: Some(90.0),
            max_generations: Some(5000),
            seed: None,
        }
    }
}

impl ConfigSection for ProcessConfig {
    fn section_name() -> &'static str {
        "process"
    }

    fn validate(&self) -> Result<(), GeneCoreError> {
        if self.parents_per_child < 1 {
            return Err(GeneCoreError::Configuration(
                "Parents per child must be at least 1".to_string()
            ));
        }
        if self.population_size < self.parents_per_child {
            return Err(GeneCoreError::Configuration(format!(
                "Population size {} is smaller than parents per child {}",
                self.population_size, self.parents_per_child
            )));
        }
        if self.pair_count < 1 {
            return Err(GeneCoreError::Configuration(
                "Pair count must be at least 1".to_string()
            ));
        }
        if self.pair_count > self.population_size {
            return Err(GeneCoreError::Configuration(format!(
                "Pair count {} exceeds population size {}",
                self.pair_count, self.population_size
            )));
        }
        if self.mutation_rate < 0.0 || self.mutation_rate > 1.0 {
            return Err(GeneCoreError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        if self.crossover_points >= self.chromosome_length {
            return Err(GeneCoreError::Configuration(format!(
                "Crossover points {} must be fewer than chromosome length {}",
                self.crossover_points, self.chromosome_length
            )));
        }
        if self.fittest_n < 1 {
            return Err(GeneCoreError::Configuration(
                "fittest_n must be at least 1".to_string()
            ));
        }
        if self.target_fitness.is_none() && self.max_generations.is_none() {
            return Err(GeneCoreError::Configuration(
                "Either target_fitness or max_generations must be set".to_string()
            ));
        }
        Ok(())
    }
}
