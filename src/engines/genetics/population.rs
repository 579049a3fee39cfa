use super::chromosome::Gene;
use super::individual::Individual;
use crate::engines::operators::traits::FitnessFunction;
use crate::error::{GeneCoreError, Result};
use crate::types::{Fitness, IndividualId};
use rayon::prelude::*;
use std::collections::HashMap;

/// Individual paired with the fitness it scored in the current ordering.
#[derive(Debug)]
pub struct IndividualWithFitness<'a, G> {
    pub individual: &'a Individual<G>,
    pub fitness: Fitness,
}

impl<G> Clone for IndividualWithFitness<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for IndividualWithFitness<'_, G> {}

impl<G: Gene> IndividualWithFitness<'_, G> {
    pub fn id(&self) -> IndividualId {
        self.individual.id()
    }
}

/// Cached ascending fitness ordering plus identity lookup into it.
#[derive(Debug, Clone)]
struct FitnessOrdering {
    ranked: Vec<(IndividualId, Fitness)>,
    positions: HashMap<IndividualId, usize>,
}

/// The set of individuals under evolution.
///
/// Individuals are keyed by identity. The fitness ordering is a cache: it is
/// built by [`Population::order_by_fitness`] and dropped by every mutation.
/// Ordered reads while the cache is dropped fail with
/// [`GeneCoreError::PopulationNotOrdered`] instead of serving stale data.
///
/// The ordering is ascending, least fit first; the fittest are at the tail.
#[derive(Debug, Clone)]
pub struct Population<G> {
    individuals: Option<HashMap<IndividualId, Individual<G>>>,
    ordering: Option<FitnessOrdering>,
}

impl<G> Default for Population<G> {
    fn default() -> Self {
        Self {
            individuals: None,
            ordering: None,
        }
    }
}

impl<G: Gene> Population<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and fill a population in one step.
    pub fn from_individuals(individuals: Vec<Individual<G>>) -> Result<Self> {
        let mut population = Self::new();
        population.set_population(individuals)?;
        Ok(population)
    }

    /// Bulk initialization. Allowed once.
    pub fn set_population(&mut self, individuals: Vec<Individual<G>>) -> Result<()> {
        if self.individuals.is_some() {
            return Err(GeneCoreError::PopulationAlreadySet);
        }

        let mut map = HashMap::with_capacity(individuals.len());
        for individual in individuals {
            let id = individual.id();
            if map.insert(id, individual).is_some() {
                return Err(GeneCoreError::DuplicateIndividual(id));
            }
        }

        self.individuals = Some(map);
        self.ordering = None;
        Ok(())
    }

    pub fn is_set(&self) -> bool {
        self.individuals.is_some()
    }

    pub fn is_ordered(&self) -> bool {
        self.ordering.is_some()
    }

    pub fn len(&self) -> usize {
        self.individuals.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: IndividualId) -> bool {
        self.individuals
            .as_ref()
            .is_some_and(|individuals| individuals.contains_key(&id))
    }

    /// Every individual, in no particular order.
    pub fn individuals(&self) -> Result<impl Iterator<Item = &Individual<G>>> {
        Ok(self.members()?.values())
    }

    /// Mutable access to every individual. Drops the ordering.
    pub fn individuals_mut(&mut self) -> Result<impl Iterator<Item = &mut Individual<G>>> {
        let individuals = self
            .individuals
            .as_mut()
            .ok_or(GeneCoreError::PopulationNotSet)?;
        self.ordering = None;
        Ok(individuals.values_mut())
    }

    pub fn individual(&self, id: IndividualId) -> Result<&Individual<G>> {
        self.members()?
            .get(&id)
            .ok_or(GeneCoreError::IndividualNotFound(id))
    }

    /// Mutable access to one individual. Drops the ordering.
    pub fn individual_mut(&mut self, id: IndividualId) -> Result<&mut Individual<G>> {
        let individuals = self
            .individuals
            .as_mut()
            .ok_or(GeneCoreError::PopulationNotSet)?;
        let individual = individuals
            .get_mut(&id)
            .ok_or(GeneCoreError::IndividualNotFound(id))?;
        self.ordering = None;
        Ok(individual)
    }

    /// Score every individual and cache the ascending ordering.
    ///
    /// No-op when the cache is still valid. Fitness is evaluated in parallel;
    /// individuals are only read.
    pub fn order_by_fitness(&mut self, fitness_function: &dyn FitnessFunction<G>) -> Result<()> {
        let individuals = self.members()?;
        if self.ordering.is_some() {
            return Ok(());
        }

        let mut ranked: Vec<(IndividualId, Fitness)> = individuals
            .par_iter()
            .map(|(id, individual)| (*id, fitness_function.fitness(individual)))
            .collect();

        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

        let positions = ranked
            .iter()
            .enumerate()
            .map(|(position, (id, _))| (*id, position))
            .collect();

        self.ordering = Some(FitnessOrdering { ranked, positions });
        Ok(())
    }

    /// Whole population, least fit first.
    pub fn population_by_fitness(&self) -> Result<Vec<IndividualWithFitness<'_, G>>> {
        let ordering = self.ordered()?;
        self.resolve(&ordering.ranked)
    }

    /// The `n` fittest individuals in increasing fitness order, fittest last.
    pub fn n_fittest(&self, n: usize) -> Result<Vec<IndividualWithFitness<'_, G>>> {
        let ordering = self.ordered()?;
        let size = ordering.ranked.len();

        if size == 0 {
            return Err(GeneCoreError::EmptyPopulation);
        }
        if n == 0 {
            return Err(GeneCoreError::InvalidArgument("n must be positive".to_string()));
        }
        if n > size {
            return Err(GeneCoreError::NotEnoughIndividuals {
                requested: n,
                available: size,
            });
        }

        self.resolve(&ordering.ranked[size - n..])
    }

    /// The `n` least fit individuals, least fit first.
    pub fn n_least_fit(&self, n: usize) -> Result<Vec<IndividualWithFitness<'_, G>>> {
        let ordering = self.ordered()?;
        let size = ordering.ranked.len();

        if n > size {
            return Err(GeneCoreError::NotEnoughIndividuals {
                requested: n,
                available: size,
            });
        }

        self.resolve(&ordering.ranked[..n])
    }

    pub fn fittest(&self) -> Result<IndividualWithFitness<'_, G>> {
        let mut fittest = self.n_fittest(1)?;
        fittest.pop().ok_or(GeneCoreError::EmptyPopulation)
    }

    pub fn individual_with_fitness(&self, id: IndividualId) -> Result<IndividualWithFitness<'_, G>> {
        let ordering = self.ordered()?;
        let position = ordering
            .positions
            .get(&id)
            .ok_or(GeneCoreError::IndividualNotFound(id))?;
        let (_, fitness) = ordering.ranked[*position];

        Ok(IndividualWithFitness {
            individual: self.individual(id)?,
            fitness,
        })
    }

    /// Swap `replaced` out for `replacing`, returning the evicted individual.
    ///
    /// Fails without touching the population when `replaced` is absent or
    /// `replacing`'s identity is already present.
    pub fn replace_individual(
        &mut self,
        replaced: IndividualId,
        replacing: Individual<G>,
    ) -> Result<Individual<G>> {
        let individuals = self
            .individuals
            .as_mut()
            .ok_or(GeneCoreError::PopulationNotSet)?;

        let replacing_id = replacing.id();
        if individuals.contains_key(&replacing_id) {
            return Err(GeneCoreError::DuplicateIndividual(replacing_id));
        }
        let evicted = individuals
            .remove(&replaced)
            .ok_or(GeneCoreError::IndividualNotFound(replaced))?;

        individuals.insert(replacing_id, replacing);
        self.ordering = None;
        Ok(evicted)
    }

    fn members(&self) -> Result<&HashMap<IndividualId, Individual<G>>> {
        self.individuals.as_ref().ok_or(GeneCoreError::PopulationNotSet)
    }

    fn ordered(&self) -> Result<&FitnessOrdering> {
        self.members()?;
        self.ordering.as_ref().ok_or(GeneCoreError::PopulationNotOrdered)
    }

    fn resolve(&self, ranked: &[(IndividualId, Fitness)]) -> Result<Vec<IndividualWithFitness<'_, G>>> {
        let individuals = self.members()?;
        ranked
            .iter()
            .map(|(id, fitness)| {
                individuals
                    .get(id)
                    .map(|individual| IndividualWithFitness {
                        individual,
                        fitness: *fitness,
                    })
                    .ok_or(GeneCoreError::IndividualNotFound(*id))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sum_fitness(individual: &Individual<i32>) -> f64 {
        individual
            .genome()
            .map(|genes| genes.iter().map(|g| *g as f64).sum())
            .unwrap_or(0.0)
    }

    fn random_population(size: usize, genome_length: usize, seed: u64) -> Population<i32> {
        let mut rng = StdRng::seed_from_u64(seed);
        let individuals = (0..size)
            .map(|_| {
                let genes = (0..genome_length).map(|_| rng.gen_range(0..10)).collect();
                Individual::from_genes(genes).unwrap()
            })
            .collect();
        Population::from_individuals(individuals).unwrap()
    }

    #[test]
    fn test_set_population_once() {
        let mut population = random_population(5, 3, 1);
        let again = vec![Individual::from_genes(vec![1]).unwrap()];
        assert!(matches!(
            population.set_population(again),
            Err(GeneCoreError::PopulationAlreadySet)
        ));
        assert_eq!(population.len(), 5);
    }

    #[test]
    fn test_duplicate_identities_rejected() {
        let individual = Individual::from_genes(vec![1, 2]).unwrap();
        let result = Population::from_individuals(vec![individual.clone(), individual]);
        assert!(matches!(result, Err(GeneCoreError::DuplicateIndividual(_))));
    }

    #[test]
    fn test_ordering_is_ascending() {
        for seed in 0..5 {
            let mut population = random_population(50, 10, seed);
            population.order_by_fitness(&sum_fitness).unwrap();

            let ordered = population.population_by_fitness().unwrap();
            assert_eq!(ordered.len(), 50);
            for pair in ordered.windows(2) {
                assert!(pair[0].fitness <= pair[1].fitness);
            }

            let fittest = population.fittest().unwrap();
            let last = ordered.last().unwrap();
            assert_eq!(fittest.id(), last.id());
            assert_eq!(fittest.fitness, last.fitness);
        }
    }

    #[test]
    fn test_nan_fitness_sorts_above_numbers() {
        let nan_for_negative = |individual: &Individual<i32>| match individual.genome().unwrap()[0] {
            g if g < 0 => f64::NAN,
            g => g as f64,
        };
        let individuals = [3, -1, 1, 2, -1]
            .iter()
            .map(|g| Individual::from_genes(vec![*g]).unwrap())
            .collect();
        let mut population = Population::from_individuals(individuals).unwrap();
        population.order_by_fitness(&nan_for_negative).unwrap();

        let fitnesses: Vec<f64> = population
            .population_by_fitness()
            .unwrap()
            .iter()
            .map(|scored| scored.fitness)
            .collect();
        assert_eq!(&fitnesses[..3], &[1.0, 2.0, 3.0]);
        assert!(fitnesses[3..].iter().all(|f| f.is_nan()));
        assert!(population.fittest().unwrap().fitness.is_nan());
    }

    #[test]
    fn test_ordered_reads_require_ordering() {
        let population = random_population(5, 3, 2);
        assert!(matches!(
            population.population_by_fitness(),
            Err(GeneCoreError::PopulationNotOrdered)
        ));
        assert!(matches!(population.fittest(), Err(GeneCoreError::PopulationNotOrdered)));
        assert!(population.n_fittest(2).is_err());

        let id = population.individuals().unwrap().next().unwrap().id();
        assert!(population.individual(id).is_ok());
        assert!(matches!(
            population.individual_with_fitness(id),
            Err(GeneCoreError::PopulationNotOrdered)
        ));
    }

    #[test]
    fn test_unset_population_fails() {
        let mut population = Population::<i32>::new();
        assert!(matches!(
            population.order_by_fitness(&sum_fitness),
            Err(GeneCoreError::PopulationNotSet)
        ));
        assert!(matches!(
            population.population_by_fitness(),
            Err(GeneCoreError::PopulationNotSet)
        ));
    }

    #[test]
    fn test_n_fittest_is_tail() {
        let individuals: Vec<_> = (1..=5)
            .map(|i| Individual::from_genes(vec![i]).unwrap())
            .collect();
        let mut population = Population::from_individuals(individuals).unwrap();
        population.order_by_fitness(&sum_fitness).unwrap();

        let top: Vec<f64> = population.n_fittest(3).unwrap().iter().map(|s| s.fitness).collect();
        assert_eq!(top, vec![3.0, 4.0, 5.0]);

        let bottom: Vec<f64> = population.n_least_fit(2).unwrap().iter().map(|s| s.fitness).collect();
        assert_eq!(bottom, vec![1.0, 2.0]);

        assert!(matches!(
            population.n_fittest(6),
            Err(GeneCoreError::NotEnoughIndividuals { requested: 6, available: 5 })
        ));
        assert!(population.n_fittest(0).is_err());
    }

    #[test]
    fn test_empty_population_has_no_fittest() {
        let mut population = Population::<i32>::from_individuals(Vec::new()).unwrap();
        population.order_by_fitness(&sum_fitness).unwrap();
        assert!(matches!(population.fittest(), Err(GeneCoreError::EmptyPopulation)));
    }

    #[test]
    fn test_replace_individual() {
        let mut population = random_population(10, 4, 3);
        population.order_by_fitness(&sum_fitness).unwrap();

        let old_id = population.fittest().unwrap().id();
        let newcomer = Individual::from_genes(vec![-1, -1, -1, -1]).unwrap();
        let new_id = newcomer.id();

        let evicted = population.replace_individual(old_id, newcomer).unwrap();
        assert_eq!(evicted.id(), old_id);
        assert_eq!(population.len(), 10);
        assert!(!population.contains(old_id));
        assert!(population.contains(new_id));
        assert!(!population.is_ordered());
        assert!(matches!(
            population.population_by_fitness(),
            Err(GeneCoreError::PopulationNotOrdered)
        ));

        population.order_by_fitness(&sum_fitness).unwrap();
        assert_eq!(population.n_least_fit(1).unwrap()[0].id(), new_id);
    }

    #[test]
    fn test_invalid_replacements_have_no_effect() {
        let mut population = random_population(4, 2, 4);
        population.order_by_fitness(&sum_fitness).unwrap();

        let missing = IndividualId::new();
        let result = population.replace_individual(missing, Individual::from_genes(vec![1]).unwrap());
        assert!(matches!(result, Err(GeneCoreError::IndividualNotFound(_))));

        let existing = population.individuals().unwrap().next().unwrap().clone();
        let other = population
            .individuals()
            .unwrap()
            .find(|i| i.id() != existing.id())
            .unwrap()
            .id();
        let result = population.replace_individual(other, existing);
        assert!(matches!(result, Err(GeneCoreError::DuplicateIndividual(_))));

        assert_eq!(population.len(), 4);
        assert!(population.is_ordered());
    }

    #[test]
    fn test_mutable_access_drops_ordering() {
        let mut population = random_population(3, 2, 5);
        population.order_by_fitness(&sum_fitness).unwrap();
        assert!(population.is_ordered());

        for individual in population.individuals_mut().unwrap() {
            individual.chromosome_mut().unwrap().set_gene_at(0, 100).unwrap();
        }
        assert!(!population.is_ordered());

        population.order_by_fitness(&sum_fitness).unwrap();
        assert!(population.fittest().unwrap().fitness >= 100.0);
    }
}
