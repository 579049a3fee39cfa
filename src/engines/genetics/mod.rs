pub mod chromosome;
pub mod individual;
pub mod population;

pub use chromosome::{Chromosome, Gene};
pub use individual::Individual;
pub use population::{IndividualWithFitness, Population};
