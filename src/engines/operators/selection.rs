use super::traits::{ParentGroup, ParentSelector};
use crate::engines::genetics::{Gene, IndividualWithFitness, Population};
use crate::error::{GeneCoreError, Result};
use crate::types::IndividualId;
use rand::{Rng, RngCore};
use std::collections::HashSet;

/// Retries granted to a strategy that keeps proposing an already chosen group.
///
/// Once spent, the duplicate is accepted. Small or converged populations may not
/// have enough distinct groups left, and picking must always make progress.
pub const UNIQUE_PARENT_PATIENCE: usize = 2;

/// A candidate group proposed by a [`GroupStrategy`].
pub struct GroupPick<'a, G> {
    pub parents: ParentGroup<'a, G>,
    /// False when the strategy has nothing more to offer after this group.
    pub more: bool,
}

/// Proposes one parent group at a time from the ordered pool.
pub trait GroupStrategy<G: Gene>: Send {
    fn pick_group<'a>(
        &self,
        pool: &[IndividualWithFitness<'a, G>],
        parents_per_child: usize,
        rng: &mut dyn RngCore,
    ) -> Result<GroupPick<'a, G>>;
}

/// Parent selector that asks a [`GroupStrategy`] for groups until `pair_count`
/// are collected, skipping groups whose member set was already chosen.
pub struct DeduplicatingSelector<S> {
    strategy: S,
    pair_count: usize,
    parents_per_child: usize,
}

impl<S> DeduplicatingSelector<S> {
    /// Both `pair_count` and `parents_per_child` must be at least one.
    pub fn new(strategy: S, pair_count: usize, parents_per_child: usize) -> Result<Self> {
        if pair_count == 0 {
            return Err(GeneCoreError::InvalidArgument(
                "pair count must be at least 1".to_string(),
            ));
        }
        if parents_per_child == 0 {
            return Err(GeneCoreError::InvalidArgument(
                "parents per child must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            strategy,
            pair_count,
            parents_per_child,
        })
    }

    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    pub fn parents_per_child(&self) -> usize {
        self.parents_per_child
    }
}

/// Selector returning only the `parents_per_child` fittest individuals.
pub type SingleGroupFittestSelector = DeduplicatingSelector<FittestGroup>;

impl SingleGroupFittestSelector {
    pub fn fittest(parents_per_child: usize) -> Result<Self> {
        Self::new(FittestGroup, 1, parents_per_child)
    }
}

impl Default for SingleGroupFittestSelector {
    /// The fittest pair.
    fn default() -> Self {
        Self {
            strategy: FittestGroup,
            pair_count: 1,
            parents_per_child: 2,
        }
    }
}

/// Sorted member identities. Same members in any order give the same signature.
fn group_signature<G: Gene>(parents: &ParentGroup<'_, G>) -> Vec<IndividualId> {
    let mut signature: Vec<IndividualId> = parents.iter().map(|p| p.id()).collect();
    signature.sort();
    signature
}

impl<G: Gene, S: GroupStrategy<G>> ParentSelector<G> for DeduplicatingSelector<S> {
    fn select_parents<'a>(
        &self,
        population: &'a Population<G>,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<ParentGroup<'a, G>>> {
        let pool = population.population_by_fitness()?;

        if pool.len() < self.parents_per_child {
            return Err(GeneCoreError::InsufficientParents {
                required: self.parents_per_child,
                available: pool.len(),
            });
        }

        let mut chosen_signatures: HashSet<Vec<IndividualId>> = HashSet::new();
        let mut chosen: Vec<ParentGroup<'a, G>> = Vec::with_capacity(self.pair_count);
        let mut reattempts = 0;

        while chosen.len() < self.pair_count {
            let pick = self.strategy.pick_group(&pool, self.parents_per_child, rng)?;
            let signature = group_signature(&pick.parents);

            if chosen_signatures.contains(&signature) {
                if reattempts < UNIQUE_PARENT_PATIENCE {
                    reattempts += 1;
                    continue;
                }
                log::warn!(
                    "No unique parent group found after {} retries, accepting duplicate",
                    UNIQUE_PARENT_PATIENCE
                );
            }
            reattempts = 0;

            chosen_signatures.insert(signature);
            chosen.push(pick.parents);

            if !pick.more {
                break;
            }
        }

        Ok(chosen)
    }
}

/// Takes the tail of the ordering: the `k` fittest individuals, once.
#[derive(Debug, Clone, Copy, Default)]
pub struct FittestGroup;

impl<G: Gene> GroupStrategy<G> for FittestGroup {
    fn pick_group<'a>(
        &self,
        pool: &[IndividualWithFitness<'a, G>],
        parents_per_child: usize,
        _rng: &mut dyn RngCore,
    ) -> Result<GroupPick<'a, G>> {
        if pool.len() < parents_per_child {
            return Err(GeneCoreError::InsufficientParents {
                required: parents_per_child,
                available: pool.len(),
            });
        }

        let parents = pool[pool.len() - parents_per_child..]
            .iter()
            .map(|scored| scored.individual)
            .collect();

        Ok(GroupPick { parents, more: false })
    }
}

/// Tournament selection: each parent is the best of `tournament_size` random
/// candidates drawn from the individuals not yet in the group.
#[derive(Debug, Clone, Copy)]
pub struct TournamentGroup {
    pub tournament_size: usize,
}

impl TournamentGroup {
    pub fn new(tournament_size: usize) -> Self {
        Self {
            tournament_size: tournament_size.max(1),
        }
    }
}

impl<G: Gene> GroupStrategy<G> for TournamentGroup {
    fn pick_group<'a>(
        &self,
        pool: &[IndividualWithFitness<'a, G>],
        parents_per_child: usize,
        rng: &mut dyn RngCore,
    ) -> Result<GroupPick<'a, G>> {
        if pool.len() < parents_per_child {
            return Err(GeneCoreError::InsufficientParents {
                required: parents_per_child,
                available: pool.len(),
            });
        }

        let mut remaining: Vec<usize> = (0..pool.len()).collect();
        let mut parents = Vec::with_capacity(parents_per_child);

        for _ in 0..parents_per_child {
            let mut best = rng.gen_range(0..remaining.len());
            for _ in 1..self.tournament_size {
                let candidate = rng.gen_range(0..remaining.len());
                if pool[remaining[candidate]].fitness > pool[remaining[best]].fitness {
                    best = candidate;
                }
            }
            parents.push(pool[remaining.swap_remove(best)].individual);
        }

        Ok(GroupPick { parents, more: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::genetics::Individual;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gene_sum(individual: &Individual<i32>) -> f64 {
        individual.genome().map(|g| g.iter().sum::<i32>() as f64).unwrap_or(0.0)
    }

    fn ordered_population(fitnesses: &[i32]) -> Population<i32> {
        let individuals = fitnesses
            .iter()
            .map(|f| Individual::from_genes(vec![*f]).unwrap())
            .collect();
        let mut population = Population::from_individuals(individuals).unwrap();
        population.order_by_fitness(&gene_sum).unwrap();
        population
    }

    /// Proposes the same fixed group forever.
    struct Stubborn;

    impl GroupStrategy<i32> for Stubborn {
        fn pick_group<'a>(
            &self,
            pool: &[IndividualWithFitness<'a, i32>],
            parents_per_child: usize,
            _rng: &mut dyn RngCore,
        ) -> Result<GroupPick<'a, i32>> {
            Ok(GroupPick {
                parents: pool[..parents_per_child].iter().map(|s| s.individual).collect(),
                more: true,
            })
        }
    }

    #[test]
    fn test_single_group_takes_fittest() {
        let population = ordered_population(&[5, 1, 9, 3, 7]);
        let selector = SingleGroupFittestSelector::fittest(2).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let groups = selector.select_parents(&population, &mut rng).unwrap();
        assert_eq!(groups.len(), 1);

        let mut genes: Vec<i32> = groups[0].iter().map(|p| p.genome().unwrap()[0]).collect();
        genes.sort();
        assert_eq!(genes, vec![7, 9]);
    }

    #[test]
    fn test_population_smaller_than_group_fails() {
        let population = ordered_population(&[1, 2]);
        let selector = SingleGroupFittestSelector::fittest(3).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            selector.select_parents(&population, &mut rng),
            Err(GeneCoreError::InsufficientParents { required: 3, available: 2 })
        ));
    }

    #[test]
    fn test_unordered_population_fails() {
        let population =
            Population::from_individuals(vec![Individual::from_genes(vec![1]).unwrap()]).unwrap();
        let selector = SingleGroupFittestSelector::fittest(1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            selector.select_parents(&population, &mut rng),
            Err(GeneCoreError::PopulationNotOrdered)
        ));
    }

    #[test]
    fn test_tournament_groups_are_distinct() {
        let fitnesses: Vec<i32> = (0..30).collect();
        let population = ordered_population(&fitnesses);
        let selector = DeduplicatingSelector::new(TournamentGroup::new(3), 10, 2).unwrap();

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let groups = selector.select_parents(&population, &mut rng).unwrap();
            assert!(groups.len() <= 10);

            let mut signatures = HashSet::new();
            for group in &groups {
                assert_eq!(group.len(), 2);
                assert_ne!(group[0].id(), group[1].id());
                assert!(signatures.insert(group_signature(group)));
            }
        }
    }

    #[test]
    fn test_signature_ignores_member_order() {
        let population = ordered_population(&[1, 2]);
        let members: Vec<&Individual<i32>> = population.individuals().unwrap().collect();
        let forward = vec![members[0], members[1]];
        let backward = vec![members[1], members[0]];
        assert_eq!(group_signature(&forward), group_signature(&backward));
    }

    #[test]
    fn test_patience_accepts_duplicates() {
        let population = ordered_population(&[1, 2, 3]);
        let selector = DeduplicatingSelector::new(Stubborn, 3, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let groups = selector.select_parents(&population, &mut rng).unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(group_signature(&groups[0]), group_signature(&groups[2]));
    }

    #[test]
    fn test_strategy_can_stop_early() {
        let population = ordered_population(&[1, 2, 3, 4]);
        let selector = DeduplicatingSelector::new(FittestGroup, 5, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let groups = selector.select_parents(&population, &mut rng).unwrap();
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_empty_selection_shape_rejected() {
        assert!(matches!(
            DeduplicatingSelector::new(FittestGroup, 0, 2),
            Err(GeneCoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            DeduplicatingSelector::new(TournamentGroup::new(2), 4, 0),
            Err(GeneCoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            SingleGroupFittestSelector::fittest(0),
            Err(GeneCoreError::InvalidArgument(_))
        ));

        let default = SingleGroupFittestSelector::default();
        assert_eq!(default.pair_count(), 1);
        assert_eq!(default.parents_per_child(), 2);
    }
}
