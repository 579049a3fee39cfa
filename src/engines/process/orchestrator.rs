use super::checkpoint::Checkpoint;
use super::information::{ProcessInformation, ProcessInformationComposer};
use super::progress::ProgressCallback;
use crate::engines::genetics::{Gene, Individual, IndividualWithFitness, Population};
use crate::engines::operators::{
    FitnessFunction, MatingFunction, ParentSelector, PopulationInitializer, PopulationModifier,
    SurvivorSelector, TerminationCondition,
};
use crate::error::{GeneCoreError, Result};
use crate::types::Fitness;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Built, no population yet.
    Uninitialized,
    /// Initial population created and ordered.
    Initialized,
    /// At least one generation completed.
    Running,
    Converged,
}

/// Drives the generational loop: select parents, mate, merge survivors, modify,
/// reorder, summarise, check termination.
///
/// Built with [`ProcessBuilder`](super::ProcessBuilder).
pub struct GeneticSelectionProcess<G: Gene> {
    pub(super) fitness_function: Box<dyn FitnessFunction<G>>,
    pub(super) population_initializer: Box<dyn PopulationInitializer<G>>,
    pub(super) population_size: usize,
    pub(super) parent_selector: Box<dyn ParentSelector<G>>,
    pub(super) mating_function: Box<dyn MatingFunction<G>>,
    pub(super) survivor_selector: Box<dyn SurvivorSelector<G>>,
    pub(super) population_modifiers: Vec<Box<dyn PopulationModifier<G>>>,
    pub(super) composer: Box<dyn ProcessInformationComposer<G>>,
    pub(super) termination_conditions: Vec<Box<dyn TerminationCondition<G>>>,
    pub(super) progress_callbacks: Vec<Box<dyn ProgressCallback>>,
    pub(super) checkpoints: Vec<Box<dyn Checkpoint<G>>>,
    pub(super) rng: StdRng,
    pub(super) population: Population<G>,
    pub(super) history: Vec<ProcessInformation>,
    pub(super) state: ProcessState,
    pub(super) generation_in_flight: bool,
}

/// Fitness of each parent in `group`, read from the current ordering, and
/// their total.
fn parent_group_fitness<G: Gene>(
    population: &Population<G>,
    group: &[&Individual<G>],
) -> Result<(Vec<Fitness>, Fitness)> {
    let fitness = group
        .iter()
        .map(|parent| {
            population
                .individual_with_fitness(parent.id())
                .map(|scored| scored.fitness)
        })
        .collect::<Result<Vec<_>>>()?;
    let total = fitness.iter().sum();
    Ok((fitness, total))
}

impl<G: Gene> GeneticSelectionProcess<G> {
    /// Create the initial population and order it by fitness.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != ProcessState::Uninitialized {
            return Err(GeneCoreError::ProcessAlreadyInitialized);
        }

        log::info!("Initializing population of {} individuals", self.population_size);
        let mut population = self
            .population_initializer
            .initialize(self.population_size, &mut self.rng)?;

        if population.len() != self.population_size {
            return Err(GeneCoreError::InvalidArgument(format!(
                "initializer produced {} individuals, expected {}",
                population.len(),
                self.population_size
            )));
        }

        population.order_by_fitness(self.fitness_function.as_ref())?;
        log::info!(
            "Initial population ready, fittest {:.4}",
            population.fittest()?.fitness
        );

        self.population = population;
        self.state = ProcessState::Initialized;
        Ok(())
    }

    /// Run exactly one generation and append its snapshot to the history.
    ///
    /// A failure part-way leaves the population in an unknown state; the process
    /// refuses further generations and population reads afterwards.
    pub fn run_generation(&mut self) -> Result<()> {
        if self.state == ProcessState::Uninitialized {
            return Err(GeneCoreError::ProcessNotInitialized);
        }
        if self.generation_in_flight {
            return Err(GeneCoreError::GenerationInterrupted);
        }

        let generation = self.history.last().map_or(1, |last| last.generation + 1);
        for callback in self.progress_callbacks.iter_mut() {
            callback.on_generation_start(generation);
        }

        self.generation_in_flight = true;
        let terminate = match self.evolve() {
            Ok(terminate) => terminate,
            Err(e) => {
                log::error!("Generation {} aborted: {}", generation, e);
                return Err(e);
            }
        };
        self.generation_in_flight = false;

        let was_converged = self.state == ProcessState::Converged;
        if terminate {
            self.state = ProcessState::Converged;
        } else if !was_converged {
            self.state = ProcessState::Running;
        }

        // evolve() always pushes a snapshot before returning Ok
        let Some(information) = self.history.last() else {
            return Err(GeneCoreError::Generation("no snapshot recorded".to_string()));
        };

        for checkpoint in self.checkpoints.iter_mut() {
            if checkpoint.is_due(information.generation) {
                log::debug!("Checkpoint at generation {}", information.generation);
                checkpoint.save(information, &self.population)?;
            }
        }

        for callback in self.progress_callbacks.iter_mut() {
            callback.on_generation_complete(information);
            if terminate && !was_converged {
                callback.on_converged(information);
            }
        }

        Ok(())
    }

    fn evolve(&mut self) -> Result<bool> {
        log::debug!("Selecting parents");
        let offspring = {
            let groups = self.parent_selector.select_parents(&self.population, &mut self.rng)?;
            if groups.is_empty() {
                return Err(GeneCoreError::Generation(
                    "parent selector returned no groups".to_string(),
                ));
            }
            log::info!("Selected {} parent groups", groups.len());

            let mut offspring = Vec::with_capacity(groups.len());
            for group in &groups {
                let child = self.mating_function.mate(group, &mut self.rng)?;
                if log::log_enabled!(log::Level::Info) {
                    let (parent_fitness, group_fitness) = parent_group_fitness(&self.population, group)?;
                    log::info!(
                        "Parents [{}] (total {:.4}) -> offspring {} ({:.4})",
                        group
                            .iter()
                            .zip(&parent_fitness)
                            .map(|(parent, fitness)| format!("{} {:.4}", parent.id().short(), fitness))
                            .collect::<Vec<_>>()
                            .join(", "),
                        group_fitness,
                        child.id().short(),
                        self.fitness_function.fitness(&child)
                    );
                }
                offspring.push(child);
            }
            offspring
        };

        log::debug!("Merging {} offspring into population", offspring.len());
        self.survivor_selector.add_offspring(&mut self.population, offspring)?;

        for modifier in &self.population_modifiers {
            log::debug!("Applying population modifier");
            let population = std::mem::take(&mut self.population);
            self.population = modifier.modify(population, &mut self.rng)?;
        }

        log::debug!("Ordering population by fitness");
        self.population.order_by_fitness(self.fitness_function.as_ref())?;

        let information = self.composer.compose(self.history.last(), &self.population)?;
        log::info!(
            "Generation {}: total {:.4}, fittest {:.4}, fittest-n {:.4}",
            information.generation,
            information.total_fitness,
            information.fittest_fitness,
            information.fittest_n_fitness
        );

        let mut terminate = false;
        for condition in &self.termination_conditions {
            if condition.should_terminate(&self.population, &information)? {
                terminate = true;
                break;
            }
        }

        self.history.push(information);
        Ok(terminate)
    }

    /// Run generations until a termination condition fires.
    pub fn run_until_convergence(&mut self) -> Result<()> {
        while !self.has_converged() {
            self.run_generation()?;
        }
        Ok(())
    }

    pub fn population(&self) -> Result<&Population<G>> {
        if self.generation_in_flight {
            return Err(GeneCoreError::GenerationInFlight);
        }
        if self.state == ProcessState::Uninitialized {
            return Err(GeneCoreError::ProcessNotInitialized);
        }
        Ok(&self.population)
    }

    pub fn fittest(&self) -> Result<IndividualWithFitness<'_, G>> {
        self.population()?.fittest()
    }

    pub fn has_converged(&self) -> bool {
        self.state == ProcessState::Converged
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn history(&self) -> &[ProcessInformation] {
        &self.history
    }

    pub fn generation(&self) -> u64 {
        self.history.last().map_or(0, |last| last.generation)
    }
}
