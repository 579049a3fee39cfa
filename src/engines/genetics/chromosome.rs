//! Chromosome representation for evolutionary search
//!
//! A chromosome is a fixed-length, ordered sequence of genes encoding the whole
//! genotype of one individual. The gene type is chosen by the caller: booleans,
//! integers, reals, or any custom value implementing [`Gene`].
//!
//! # Lifecycle
//!
//! - Created empty with [`Chromosome::new`]
//! - Sized exactly once with [`Chromosome::initialize`]
//! - Written gene by gene or in bulk with [`Chromosome::set_genes`]
//!
//! Writes never grow the chromosome; every positional access is bounds-checked.
//!
//! # Example
//!
//! ```
//! use genecore::engines::genetics::Chromosome;
//!
//! let mut chromosome = Chromosome::<bool>::new();
//! chromosome.initialize(4).unwrap();
//! chromosome.set_genes(&[true, false], 1).unwrap();
//! assert_eq!(chromosome.genome().unwrap(), &[false, true, false, false]);
//! ```

use crate::error::{GeneCoreError, Result};
use std::fmt::Debug;

/// Atomic value stored in a chromosome.
pub trait Gene: Clone + Default + Debug + Send + Sync + 'static {}

impl<T> Gene for T where T: Clone + Default + Debug + Send + Sync + 'static {}

#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome<G> {
    genome: Option<Vec<G>>,
}

impl<G> Default for Chromosome<G> {
    fn default() -> Self {
        Self { genome: None }
    }
}

impl<G: Gene> Chromosome<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an initialized chromosome holding exactly `genes`.
    pub fn from_genes(genes: Vec<G>) -> Result<Self> {
        if genes.is_empty() {
            return Err(GeneCoreError::InvalidChromosomeSize(0));
        }
        Ok(Self { genome: Some(genes) })
    }

    /// Allocate `size` default-valued genes. Allowed once.
    pub fn initialize(&mut self, size: usize) -> Result<()> {
        if size == 0 {
            return Err(GeneCoreError::InvalidChromosomeSize(size));
        }
        if self.genome.is_some() {
            return Err(GeneCoreError::ChromosomeAlreadyInitialized);
        }

        self.genome = Some(vec![G::default(); size]);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.genome.is_some()
    }

    pub fn len(&self) -> usize {
        self.genome.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy `genes` into the chromosome starting at `start`.
    pub fn set_genes(&mut self, genes: &[G], start: usize) -> Result<()> {
        let genome = self.genome_mut()?;
        if genes.is_empty() {
            return Err(GeneCoreError::EmptyGenes);
        }

        let length = genome.len();
        let stop = match start.checked_add(genes.len()) {
            Some(stop) if stop <= length => stop,
            _ => {
                return Err(GeneCoreError::GeneOutOfRange {
                    index: start.saturating_add(genes.len()),
                    length,
                })
            }
        };

        genome[start..stop].clone_from_slice(genes);
        Ok(())
    }

    pub fn gene_at(&self, position: usize) -> Result<&G> {
        let genome = self.genome()?;
        genome.get(position).ok_or(GeneCoreError::GeneOutOfRange {
            index: position,
            length: genome.len(),
        })
    }

    pub fn set_gene_at(&mut self, position: usize, gene: G) -> Result<()> {
        let genome = self.genome_mut()?;
        let length = genome.len();
        let slot = genome
            .get_mut(position)
            .ok_or(GeneCoreError::GeneOutOfRange { index: position, length })?;
        *slot = gene;
        Ok(())
    }

    /// Genes in `[start, start + length)`.
    pub fn gene_range(&self, start: usize, length: usize) -> Result<&[G]> {
        let genome = self.genome()?;
        let stop = match start.checked_add(length) {
            Some(stop) if stop <= genome.len() => stop,
            _ => {
                return Err(GeneCoreError::GeneOutOfRange {
                    index: start.saturating_add(length),
                    length: genome.len(),
                })
            }
        };
        Ok(&genome[start..stop])
    }

    pub fn genome(&self) -> Result<&[G]> {
        self.genome
            .as_deref()
            .ok_or(GeneCoreError::ChromosomeNotInitialized)
    }

    fn genome_mut(&mut self) -> Result<&mut Vec<G>> {
        self.genome
            .as_mut()
            .ok_or(GeneCoreError::ChromosomeNotInitialized)
    }
}
