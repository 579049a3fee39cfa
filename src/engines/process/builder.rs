use super::checkpoint::Checkpoint;
use super::information::{FittestComposer, ProcessInformationComposer};
use super::orchestrator::{GeneticSelectionProcess, ProcessState};
use super::progress::ProgressCallback;
use crate::config::{ConfigSection, ProcessConfig};
use crate::engines::genetics::{Gene, Population};
use crate::engines::operators::{
    CrossOverMatingFunction, DeduplicatingSelector, FitnessFunction, FitnessThreshold,
    GenerationCount, MatingFunction, ParentSelector, PopulationInitializer, PopulationModifier,
    ReplaceLeastFitSelector, SingleGroupFittestSelector, SurvivorSelector, TerminationCondition,
    TournamentGroup,
};
use crate::error::{GeneCoreError, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Assembles a [`GeneticSelectionProcess`].
///
/// Required: fitness function, population initializer, population size, mating
/// function, survivor selector and at least one termination condition. The
/// parent selector defaults to the single fittest pair and the composer to the
/// mean of the three fittest. Setting a collaborator twice keeps the last one.
pub struct ProcessBuilder<G: Gene> {
    fitness_function: Option<Box<dyn FitnessFunction<G>>>,
    population_initializer: Option<Box<dyn PopulationInitializer<G>>>,
    population_size: Option<usize>,
    parent_selector: Option<Box<dyn ParentSelector<G>>>,
    mating_function: Option<Box<dyn MatingFunction<G>>>,
    survivor_selector: Option<Box<dyn SurvivorSelector<G>>>,
    population_modifiers: Vec<Box<dyn PopulationModifier<G>>>,
    composer: Option<Box<dyn ProcessInformationComposer<G>>>,
    termination_conditions: Vec<Box<dyn TerminationCondition<G>>>,
    progress_callbacks: Vec<Box<dyn ProgressCallback>>,
    checkpoints: Vec<Box<dyn Checkpoint<G>>>,
    seed: Option<u64>,
}

impl<G: Gene> Default for ProcessBuilder<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Gene> ProcessBuilder<G> {
    pub fn new() -> Self {
        Self {
            fitness_function: None,
            population_initializer: None,
            population_size: None,
            parent_selector: None,
            mating_function: None,
            survivor_selector: None,
            population_modifiers: Vec::new(),
            composer: None,
            termination_conditions: Vec::new(),
            progress_callbacks: Vec::new(),
            checkpoints: Vec::new(),
            seed: None,
        }
    }

    /// Everything in `config` that does not depend on the gene type: population
    /// size, seed, parent selection, crossover, replace-least-fit survivors,
    /// composer window and termination. Fitness, initializer and mutation are
    /// left to the caller.
    pub fn from_config(config: &ProcessConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Self::new()
            .with_population_size(config.population_size)
            .with_mating_function(CrossOverMatingFunction::new(config.crossover_points))
            .with_survivor_selector(ReplaceLeastFitSelector)
            .with_composer(FittestComposer::new(config.fittest_n));

        builder = if config.pair_count == 1 {
            builder.with_parent_selector(SingleGroupFittestSelector::fittest(config.parents_per_child)?)
        } else {
            builder.with_parent_selector(DeduplicatingSelector::new(
                TournamentGroup::new(config.tournament_size),
                config.pair_count,
                config.parents_per_child,
            )?)
        };

        if let Some(target) = config.target_fitness {
            builder = builder.with_termination_condition(FitnessThreshold::new(target));
        }
        if let Some(max_generations) = config.max_generations {
            builder = builder.with_termination_condition(GenerationCount::new(max_generations));
        }
        if let Some(seed) = config.seed {
            builder = builder.with_seed(seed);
        }

        Ok(builder)
    }

    pub fn with_fitness_function<F: FitnessFunction<G> + 'static>(mut self, fitness_function: F) -> Self {
        self.fitness_function = Some(Box::new(fitness_function));
        self
    }

    pub fn with_population_initializer<I: PopulationInitializer<G> + 'static>(mut self, initializer: I) -> Self {
        self.population_initializer = Some(Box::new(initializer));
        self
    }

    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    pub fn with_parent_selector<S: ParentSelector<G> + 'static>(mut self, selector: S) -> Self {
        self.parent_selector = Some(Box::new(selector));
        self
    }

    pub fn with_mating_function<M: MatingFunction<G> + 'static>(mut self, mating_function: M) -> Self {
        self.mating_function = Some(Box::new(mating_function));
        self
    }

    pub fn with_survivor_selector<S: SurvivorSelector<G> + 'static>(mut self, selector: S) -> Self {
        self.survivor_selector = Some(Box::new(selector));
        self
    }

    /// Modifiers run in insertion order after survivor selection.
    pub fn with_population_modifier<M: PopulationModifier<G> + 'static>(mut self, modifier: M) -> Self {
        self.population_modifiers.push(Box::new(modifier));
        self
    }

    pub fn with_composer<C: ProcessInformationComposer<G> + 'static>(mut self, composer: C) -> Self {
        self.composer = Some(Box::new(composer));
        self
    }

    pub fn with_termination_condition<T: TerminationCondition<G> + 'static>(mut self, condition: T) -> Self {
        self.termination_conditions.push(Box::new(condition));
        self
    }

    pub fn with_progress_callback<C: ProgressCallback + 'static>(mut self, callback: C) -> Self {
        self.progress_callbacks.push(Box::new(callback));
        self
    }

    pub fn with_checkpoint<C: Checkpoint<G> + 'static>(mut self, checkpoint: C) -> Self {
        self.checkpoints.push(Box::new(checkpoint));
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fails with every missing collaborator listed at once.
    pub fn build(self) -> Result<GeneticSelectionProcess<G>> {
        if self.population_size == Some(0) {
            return Err(GeneCoreError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }

        let mut missing = Vec::new();
        if self.fitness_function.is_none() {
            missing.push("fitness function".to_string());
        }
        if self.population_initializer.is_none() {
            missing.push("population initializer".to_string());
        }
        if self.population_size.is_none() {
            missing.push("population size".to_string());
        }
        if self.mating_function.is_none() {
            missing.push("mating function".to_string());
        }
        if self.survivor_selector.is_none() {
            missing.push("survivor selector".to_string());
        }
        if self.termination_conditions.is_empty() {
            missing.push("termination conditions".to_string());
        }

        let (
            Some(fitness_function),
            Some(population_initializer),
            Some(population_size),
            Some(mating_function),
            Some(survivor_selector),
            true,
        ) = (
            self.fitness_function,
            self.population_initializer,
            self.population_size,
            self.mating_function,
            self.survivor_selector,
            missing.is_empty(),
        )
        else {
            return Err(GeneCoreError::ProcessNotCompleted { missing });
        };

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(GeneticSelectionProcess {
            fitness_function,
            population_initializer,
            population_size,
            parent_selector: self
                .parent_selector
                .unwrap_or_else(|| Box::new(SingleGroupFittestSelector::default())),
            mating_function,
            survivor_selector,
            population_modifiers: self.population_modifiers,
            composer: self
                .composer
                .unwrap_or_else(|| Box::new(FittestComposer::default())),
            termination_conditions: self.termination_conditions,
            progress_callbacks: self.progress_callbacks,
            checkpoints: self.checkpoints,
            rng,
            population: Population::new(),
            history: Vec::new(),
            state: ProcessState::Uninitialized,
            generation_in_flight: false,
        })
    }
}
