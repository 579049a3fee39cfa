use super::chromosome::{Chromosome, Gene};
use crate::error::{GeneCoreError, Result};
use crate::types::IndividualId;

/// One candidate solution: a unique identity paired with a single chromosome.
///
/// Cloning keeps the identity, so a clone is a defensive copy of the same
/// individual rather than a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<G> {
    id: IndividualId,
    chromosome: Option<Chromosome<G>>,
}

impl<G: Gene> Individual<G> {
    /// New individual with a fresh identity and no chromosome yet.
    pub fn new() -> Self {
        Self {
            id: IndividualId::new(),
            chromosome: None,
        }
    }

    /// New individual carrying an already initialized chromosome.
    pub fn with_chromosome(chromosome: Chromosome<G>) -> Result<Self> {
        let mut individual = Self::new();
        individual.set_chromosome(chromosome)?;
        Ok(individual)
    }

    /// Shortcut for `with_chromosome(Chromosome::from_genes(genes)?)`.
    pub fn from_genes(genes: Vec<G>) -> Result<Self> {
        Self::with_chromosome(Chromosome::from_genes(genes)?)
    }

    /// Attach the chromosome. Only one attachment is ever allowed.
    pub fn set_chromosome(&mut self, chromosome: Chromosome<G>) -> Result<()> {
        if !chromosome.is_initialized() {
            return Err(GeneCoreError::ChromosomeNotInitialized);
        }
        if self.chromosome.is_some() {
            return Err(GeneCoreError::ChromosomeAlreadyAttached(self.id));
        }

        self.chromosome = Some(chromosome);
        Ok(())
    }

    pub fn id(&self) -> IndividualId {
        self.id
    }

    pub fn has_chromosome(&self) -> bool {
        self.chromosome.is_some()
    }

    pub fn chromosome(&self) -> Result<&Chromosome<G>> {
        self.chromosome
            .as_ref()
            .ok_or(GeneCoreError::ChromosomeMissing(self.id))
    }

    /// Mutable access for in-place point mutation.
    pub fn chromosome_mut(&mut self) -> Result<&mut Chromosome<G>> {
        let id = self.id;
        self.chromosome
            .as_mut()
            .ok_or(GeneCoreError::ChromosomeMissing(id))
    }

    /// The full genome, failing when no chromosome is attached.
    pub fn genome(&self) -> Result<&[G]> {
        self.chromosome()?.genome()
    }
}

impl<G: Gene> Default for Individual<G> {
    fn default() -> Self {
        Self::new()
    }
}
