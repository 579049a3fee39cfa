pub mod initializers;
pub mod mating;
pub mod mutation;
pub mod selection;
pub mod survivors;
pub mod termination;
pub mod traits;

pub use initializers::{random_chromosome, RandomPopulationInitializer};
pub use mating::{crossover_with_points, CrossOverMatingFunction, RandomCombinationMatingFunction};
pub use mutation::{GeneProvider, RandomMutationModifier};
pub use selection::{
    DeduplicatingSelector, FittestGroup, GroupPick, GroupStrategy, SingleGroupFittestSelector,
    TournamentGroup, UNIQUE_PARENT_PATIENCE,
};
pub use survivors::ReplaceLeastFitSelector;
pub use termination::{FitnessThreshold, GenerationCount};
pub use traits::{
    FitnessFunction, MatingFunction, ParentGroup, ParentSelector, PopulationInitializer,
    PopulationModifier, SurvivorSelector, TerminationCondition,
};
