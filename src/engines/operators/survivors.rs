use super::traits::SurvivorSelector;
use crate::engines::genetics::{Gene, Individual, Population};
use crate::error::{GeneCoreError, Result};
use crate::types::IndividualId;
use std::collections::HashSet;

/// Evicts the least fit individuals, one per offspring, and puts the offspring
/// in their place. Population size is unchanged and the fittest always survive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplaceLeastFitSelector;

impl ReplaceLeastFitSelector {
    pub fn new() -> Self {
        Self
    }
}

impl<G: Gene> SurvivorSelector<G> for ReplaceLeastFitSelector {
    fn add_offspring(&self, population: &mut Population<G>, offspring: Vec<Individual<G>>) -> Result<()> {
        let evicted: Vec<IndividualId> = population
            .n_least_fit(offspring.len())?
            .iter()
            .map(|scored| scored.id())
            .collect();

        // Validate every replacement up front so a bad offspring leaves the
        // population untouched.
        let mut incoming = HashSet::with_capacity(offspring.len());
        for child in &offspring {
            let id = child.id();
            if population.contains(id) || !incoming.insert(id) {
                return Err(GeneCoreError::DuplicateIndividual(id));
            }
        }

        for (replaced, replacing) in evicted.into_iter().zip(offspring) {
            population.replace_individual(replaced, replacing)?;
        }

        Ok(())
    }
}
