use crate::engines::genetics::{Gene, Individual, Population};
use crate::engines::process::ProcessInformation;
use crate::error::Result;
use crate::types::Fitness;
use rand::RngCore;

/// One group of parents that mates into a single offspring.
pub type ParentGroup<'a, G> = Vec<&'a Individual<G>>;

/// Scores an individual. Must be pure: same genome, same score.
pub trait FitnessFunction<G>: Send + Sync {
    fn fitness(&self, individual: &Individual<G>) -> Fitness;
}

impl<G, F> FitnessFunction<G> for F
where
    F: Fn(&Individual<G>) -> Fitness + Send + Sync,
{
    fn fitness(&self, individual: &Individual<G>) -> Fitness {
        self(individual)
    }
}

/// Produces the initial, unordered population.
pub trait PopulationInitializer<G: Gene>: Send {
    fn initialize(&self, size: usize, rng: &mut dyn RngCore) -> Result<Population<G>>;
}

/// Chooses groups of parents from a fitness-ordered population.
pub trait ParentSelector<G: Gene>: Send {
    fn select_parents<'a>(
        &self,
        population: &'a Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<ParentGroup<'a, G>>>;
}

/// Combines a parent group into exactly one new individual.
pub trait MatingFunction<G: Gene>: Send {
    fn mate(&self, parents: &[&Individual<G>], rng: &mut dyn RngCore) -> Result<Individual<G>>;
}

/// Folds offspring into the population.
pub trait SurvivorSelector<G: Gene>: Send {
    fn add_offspring(&self, population: &mut Population<G>, offspring: Vec<Individual<G>>) -> Result<()>;
}

/// Reshapes the population after survivor selection, e.g. mutation.
pub trait PopulationModifier<G: Gene>: Send {
    fn modify(&self, population: Population<G>, rng: &mut dyn RngCore) -> Result<Population<G>>;
}

/// Decides whether the run should stop after the latest generation.
pub trait TerminationCondition<G: Gene>: Send {
    fn should_terminate(&self, population: &Population<G>, process: &ProcessInformation) -> Result<bool>;
}

impl<G, F> TerminationCondition<G> for F
where
    G: Gene,
    F: Fn(&Population<G>, &ProcessInformation) -> bool + Send,
{
    fn should_terminate(&self, population: &Population<G>, process: &ProcessInformation) -> Result<bool> {
        Ok(self(population, process))
    }
}
