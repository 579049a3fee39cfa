use super::traits::PopulationInitializer;
use crate::engines::genetics::{Chromosome, Gene, Individual, Population};
use crate::error::{GeneCoreError, Result};
use rand::{Rng, RngCore};

type GeneGenerator<G> = Box<dyn Fn(&mut dyn RngCore) -> G + Send + Sync>;

/// Chromosome of `length` genes drawn from `generator`.
pub fn random_chromosome<G, F>(length: usize, rng: &mut dyn RngCore, generator: F) -> Result<Chromosome<G>>
where
    G: Gene,
    F: Fn(&mut dyn RngCore) -> G,
{
    if length == 0 {
        return Err(GeneCoreError::InvalidChromosomeSize(length));
    }
    let genes = (0..length).map(|_| generator(&mut *rng)).collect();
    Chromosome::from_genes(genes)
}

/// Fills a population with individuals whose genes are drawn independently
/// from a generator.
pub struct RandomPopulationInitializer<G> {
    chromosome_length: usize,
    generator: GeneGenerator<G>,
}

impl<G: Gene> RandomPopulationInitializer<G> {
    pub fn new<F>(chromosome_length: usize, generator: F) -> Result<Self>
    where
        F: Fn(&mut dyn RngCore) -> G + Send + Sync + 'static,
    {
        if chromosome_length == 0 {
            return Err(GeneCoreError::InvalidChromosomeSize(chromosome_length));
        }
        Ok(Self {
            chromosome_length,
            generator: Box::new(generator),
        })
    }

    pub fn chromosome_length(&self) -> usize {
        self.chromosome_length
    }
}

impl RandomPopulationInitializer<bool> {
    pub fn booleans(chromosome_length: usize) -> Result<Self> {
        Self::new(chromosome_length, |rng: &mut dyn RngCore| rng.gen::<bool>())
    }
}

impl RandomPopulationInitializer<i64> {
    /// Integers uniformly drawn from `[min, max)`.
    pub fn integers(chromosome_length: usize, min: i64, max: i64) -> Result<Self> {
        if min >= max {
            return Err(GeneCoreError::InvalidArgument(format!(
                "integer range [{}, {}) is empty",
                min, max
            )));
        }
        Self::new(chromosome_length, move |rng: &mut dyn RngCore| rng.gen_range(min..max))
    }
}

impl RandomPopulationInitializer<f64> {
    /// Reals computed as `min + u * (max - min)` with `u` uniform in `[0, 1)`.
    pub fn reals(chromosome_length: usize, min: f64, max: f64) -> Result<Self> {
        if !(min <= max) {
            return Err(GeneCoreError::InvalidArgument(format!(
                "real range [{}, {}) is invalid",
                min, max
            )));
        }
        Self::new(chromosome_length, move |rng: &mut dyn RngCore| {
            min + rng.gen::<f64>() * (max - min)
        })
    }
}

impl<G: Gene> PopulationInitializer<G> for RandomPopulationInitializer<G> {
    fn initialize(&self, size: usize, rng: &mut dyn RngCore) -> Result<Population<G>> {
        if size == 0 {
            return Err(GeneCoreError::EmptyPopulation);
        }

        let individuals = (0..size)
            .map(|_| {
                let chromosome = random_chromosome(self.chromosome_length, &mut *rng, &self.generator)?;
                Individual::with_chromosome(chromosome)
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Generated {} random individuals of length {}",
            size,
            self.chromosome_length
        );
        Population::from_individuals(individuals)
    }
}
