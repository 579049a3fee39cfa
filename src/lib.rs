//! Generic genetic-algorithm engine.
//!
//! A [`GeneticSelectionProcess`](engines::process::GeneticSelectionProcess) evolves a
//! [`Population`](engines::genetics::Population) of individuals through pluggable
//! selection, mating, survivor and termination strategies, assembled with a
//! [`ProcessBuilder`](engines::process::ProcessBuilder).

pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use error::{GeneCoreError, Result};
pub use types::{Fitness, IndividualId};
