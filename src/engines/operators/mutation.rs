use super::traits::PopulationModifier;
use crate::engines::genetics::{Gene, Population};
use crate::error::{GeneCoreError, Result};
use rand::{Rng, RngCore};

/// Produces a replacement gene.
pub type GeneProvider<G> = Box<dyn Fn(&mut dyn RngCore) -> G + Send + Sync>;

/// Point mutation: each gene of every individual is independently replaced
/// with probability `mutation_rate` by a gene from the provider.
pub struct RandomMutationModifier<G> {
    mutation_rate: f64,
    gene_provider: GeneProvider<G>,
}

impl<G: Gene> RandomMutationModifier<G> {
    pub fn new<F>(mutation_rate: f64, gene_provider: F) -> Result<Self>
    where
        F: Fn(&mut dyn RngCore) -> G + Send + Sync + 'static,
    {
        if !(0.0..=1.0).contains(&mutation_rate) {
            return Err(GeneCoreError::InvalidArgument(format!(
                "mutation rate {} must be between 0 and 1",
                mutation_rate
            )));
        }

        Ok(Self {
            mutation_rate,
            gene_provider: Box::new(gene_provider),
        })
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }
}

impl RandomMutationModifier<bool> {
    /// Replacement genes are fair coin flips.
    pub fn booleans(mutation_rate: f64) -> Result<Self> {
        Self::new(mutation_rate, |rng: &mut dyn RngCore| rng.gen::<bool>())
    }
}

impl<G: Gene> PopulationModifier<G> for RandomMutationModifier<G> {
    fn modify(&self, mut population: Population<G>, rng: &mut dyn RngCore) -> Result<Population<G>> {
        if self.mutation_rate > 0.0 {
            for individual in population.individuals_mut()? {
                let chromosome = individual.chromosome_mut()?;
                for position in 0..chromosome.len() {
                    if rng.gen::<f64>() < self.mutation_rate {
                        chromosome.set_gene_at(position, (self.gene_provider)(&mut *rng))?;
                    }
                }
            }
        }

        Ok(population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::genetics::Individual;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_rate_out_of_range_rejected() {
        assert!(RandomMutationModifier::<bool>::booleans(-0.1).is_err());
        assert!(RandomMutationModifier::<bool>::booleans(1.5).is_err());
        assert!(RandomMutationModifier::<bool>::booleans(0.0).is_ok());
        assert!(RandomMutationModifier::<bool>::booleans(1.0).is_ok());
    }

    #[test]
    fn test_mutated_fraction_matches_rate() {
        let mut rng = StdRng::seed_from_u64(11);
        let genome_length = 10_000;

        for rate in [0.05, 0.3, 0.75] {
            let individuals: Vec<Individual<i32>> = (0..5)
                .map(|_| {
                    let genes = (0..genome_length).map(|_| rng.gen_range(0..100)).collect();
                    Individual::from_genes(genes).unwrap()
                })
                .collect();
            let originals: HashMap<_, Vec<i32>> = individuals
                .iter()
                .map(|i| (i.id(), i.genome().unwrap().to_vec()))
                .collect();
            let population = Population::from_individuals(individuals).unwrap();

            // Replacement genes fall outside the original range, so every
            // mutation is observable.
            let modifier =
                RandomMutationModifier::new(rate, |rng: &mut dyn RngCore| rng.gen_range(100..200)).unwrap();
            let mutated = modifier.modify(population, &mut rng).unwrap();

            let mut changed = 0usize;
            let mut total = 0usize;
            for individual in mutated.individuals().unwrap() {
                let before = &originals[&individual.id()];
                for (old, new) in before.iter().zip(individual.genome().unwrap()) {
                    total += 1;
                    if old != new {
                        changed += 1;
                    }
                }
            }

            let ratio = changed as f64 / total as f64;
            assert!((ratio - rate).abs() < 0.02, "rate {} observed {}", rate, ratio);
        }
    }

    #[test]
    fn test_identities_survive_mutation() {
        let individuals: Vec<Individual<bool>> = (0..10)
            .map(|_| Individual::from_genes(vec![false; 50]).unwrap())
            .collect();
        let ids: Vec<_> = individuals.iter().map(|i| i.id()).collect();
        let population = Population::from_individuals(individuals).unwrap();

        let modifier = RandomMutationModifier::booleans(1.0).unwrap();
        let mutated = modifier.modify(population, &mut StdRng::seed_from_u64(2)).unwrap();

        assert_eq!(mutated.len(), 10);
        for id in ids {
            assert!(mutated.contains(id));
        }
        assert!(!mutated.is_ordered());
    }
}
