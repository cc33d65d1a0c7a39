// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Local search as a mutation operator for evolutionary algorithms.
//!
//! `LocalSearchMutation` copies the parent, descends to a local optimum and
//! returns the result. A mutation that hands back its parent unchanged adds
//! nothing to a population, so when the optimized child describes the same
//! cycle as the parent the child is perturbed and optimized again. Rotations
//! and reversals of the parent count as the parent. The number of such rounds is
//! bounded by `MutationConfig::max_attempts`; when the budget runs out the
//! child is returned anyway.
//!
//! The random source is only used for perturbations. The descent itself is
//! deterministic, so equal seeds yield equal children.

use crate::{
    config::MutationConfig, engine::MultiNeighborhoodSearchEngine,
    neighborhood::neighborhoods::Neighborhoods, perturbation::Perturbation,
};
use rand::Rng;
use waypoint_core::num::value::CostNumeric;
use waypoint_model::{cost::DistanceOracle, tour::Tour};

/// The child produced by one mutation together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome<T> {
    tour: Tour,
    attempts: usize,
    distinct: bool,
    length: T,
}

impl<T> MutationOutcome<T>
where
    T: Copy,
{
    #[inline]
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    #[inline]
    pub fn into_tour(self) -> Tour {
        self.tour
    }

    /// Returns the number of perturb-and-reoptimize rounds that were needed.
    #[inline]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Returns `true` if the child is a different cycle than its parent.
    #[inline]
    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    #[inline]
    pub fn length(&self) -> T {
        self.length
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalSearchMutation<T> {
    engine: MultiNeighborhoodSearchEngine<T>,
    config: MutationConfig,
}

impl<T> Default for LocalSearchMutation<T>
where
    T: CostNumeric,
{
    fn default() -> Self {
        Self::new(MultiNeighborhoodSearchEngine::default(), MutationConfig::default())
    }
}

impl<T> LocalSearchMutation<T>
where
    T: CostNumeric,
{
    #[inline]
    pub fn new(engine: MultiNeighborhoodSearchEngine<T>, config: MutationConfig) -> Self {
        Self { engine, config }
    }

    #[inline]
    pub fn engine(&self) -> &MultiNeighborhoodSearchEngine<T> {
        &self.engine
    }

    #[inline]
    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Returns a locally optimal child of `parent`, distinct from it whenever
    /// the retry budget allows.
    pub fn mutate<D, N, R>(&self, parent: &Tour, oracle: &D, neighborhoods: &N, rng: &mut R) -> Tour
    where
        D: DistanceOracle<T> + ?Sized,
        N: Neighborhoods + ?Sized,
        R: Rng + ?Sized,
    {
        self.mutate_detailed(parent, oracle, neighborhoods, rng)
            .into_tour()
    }

    /// Like `mutate`, but also reports the attempts used and whether the child
    /// differs from the parent.
    #[tracing::instrument(
        level = "debug",
        name = "Local Search Mutation",
        skip_all,
        fields(num_cities = parent.len())
    )]
    pub fn mutate_detailed<D, N, R>(
        &self,
        parent: &Tour,
        oracle: &D,
        neighborhoods: &N,
        rng: &mut R,
    ) -> MutationOutcome<T>
    where
        D: DistanceOracle<T> + ?Sized,
        N: Neighborhoods + ?Sized,
        R: Rng + ?Sized,
    {
        let mut child = parent.clone();
        self.engine.optimize(&mut child, oracle, neighborhoods);

        let mut attempts = 0;
        while child.is_same_cycle(parent) && attempts < self.config.max_attempts() {
            attempts += 1;
            let perturbation = Perturbation::random(rng);
            let segment_len = rng.random_range(self.config.segment_len_range());
            if !perturbation.apply(&mut child, segment_len, rng) {
                continue;
            }
            tracing::trace!(%perturbation, segment_len, attempts, "perturbed child");
            self.engine.optimize(&mut child, oracle, neighborhoods);
        }

        let distinct = !child.is_same_cycle(parent);
        if !distinct {
            tracing::debug!(
                attempts,
                "perturbation budget exhausted, returning a copy of the parent"
            );
        }

        let length = child.length(oracle);
        MutationOutcome {
            tour: child,
            attempts,
            distinct,
            length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SearchConfig,
        neighborhood::{candidate::CandidateNeighborhoods, neighborhoods::FullNeighborhoods},
    };
    use rand::{SeedableRng, rngs::StdRng};
    use waypoint_model::{
        candidates::CandidateList,
        cost::{Coordinates, DistanceMatrix, RoundedEuclideanDistance},
    };

    fn random_instance(n: usize, seed: u64) -> RoundedEuclideanDistance {
        let mut rng = StdRng::seed_from_u64(seed);
        RoundedEuclideanDistance::new(Coordinates::new(
            (0..n)
                .map(|_| (rng.random_range(0.0..500.0), rng.random_range(0.0..500.0)))
                .collect(),
        ))
    }

    #[test]
    fn test_improvable_parent_needs_no_perturbation() {
        let oracle = random_instance(30, 17);
        let neighborhoods = CandidateNeighborhoods::from(CandidateList::nearest(&oracle, 6).unwrap());
        let parent = Tour::identity(30);
        let mutation = LocalSearchMutation::<i64>::default();

        let outcome = mutation.mutate_detailed(&parent, &oracle, &neighborhoods, &mut StdRng::seed_from_u64(1));
        assert!(outcome.is_distinct());
        assert_eq!(outcome.attempts(), 0);
        assert_eq!(outcome.length(), outcome.tour().length(&oracle));
        assert!(outcome.length() < parent.length(&oracle));
    }

    #[test]
    fn test_flat_costs_are_escaped_by_one_perturbation() {
        // No move improves a tour on constant costs, so the descent never
        // undoes a perturbation.
        let costs = DistanceMatrix::from_fn(10, |_, _| 5i64);
        let neighborhoods = FullNeighborhoods::new(10);
        let parent = Tour::identity(10);
        let mutation = LocalSearchMutation::<i64>::default();

        let outcome = mutation.mutate_detailed(&parent, &costs, &neighborhoods, &mut StdRng::seed_from_u64(3));
        assert!(outcome.is_distinct());
        assert_eq!(outcome.attempts(), 1);
        assert_eq!(outcome.length(), 50);
    }

    #[test]
    fn test_exhausted_budget_returns_parent() {
        let costs = DistanceMatrix::from_fn(2, |_, _| 1i64);
        let neighborhoods = FullNeighborhoods::new(2);
        let parent = Tour::identity(2);
        let config = MutationConfig::builder()
            .with_max_attempts(3)
            .with_segment_len(1, 1)
            .build()
            .unwrap();
        let mutation = LocalSearchMutation::new(MultiNeighborhoodSearchEngine::default(), config);

        let outcome = mutation.mutate_detailed(&parent, &costs, &neighborhoods, &mut StdRng::seed_from_u64(0));
        assert!(!outcome.is_distinct());
        assert_eq!(outcome.attempts(), 3);
        assert_eq!(outcome.tour(), &parent);
    }

    #[test]
    fn test_children_of_local_optima_are_local_optima() {
        let oracle = random_instance(40, 23);
        let neighborhoods = CandidateNeighborhoods::from(CandidateList::nearest(&oracle, 6).unwrap());
        let engine = MultiNeighborhoodSearchEngine::new(SearchConfig::<i64>::default());
        let mutation = LocalSearchMutation::new(engine.clone(), MutationConfig::default());
        let mut rng = StdRng::seed_from_u64(99);

        let mut parent = Tour::identity(40);
        engine.optimize(&mut parent, &oracle, &neighborhoods);

        for _ in 0..5 {
            let outcome = mutation.mutate_detailed(&parent, &oracle, &neighborhoods, &mut rng);
            assert!(outcome.attempts() <= mutation.config().max_attempts());
            assert_eq!(outcome.is_distinct(), !outcome.tour().is_same_cycle(&parent));
            if !outcome.is_distinct() {
                assert_eq!(outcome.attempts(), mutation.config().max_attempts());
            }

            let mut again = outcome.tour().clone();
            let rerun = engine.optimize(&mut again, &oracle, &neighborhoods);
            assert_eq!(rerun.statistics().applied_moves, 0);
        }
    }

    #[test]
    fn test_equal_seeds_give_equal_children() {
        let oracle = random_instance(25, 4);
        let neighborhoods = FullNeighborhoods::new(25);
        let mutation = LocalSearchMutation::<i64>::default();
        let mut parent = Tour::identity(25);
        mutation.engine().optimize(&mut parent, &oracle, &neighborhoods);

        let a = mutation.mutate(&parent, &oracle, &neighborhoods, &mut StdRng::seed_from_u64(8));
        let b = mutation.mutate(&parent, &oracle, &neighborhoods, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
    }
}
