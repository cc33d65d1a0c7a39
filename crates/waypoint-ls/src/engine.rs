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

//! Multi-neighborhood descent driver.
//!
//! The engine walks the pivot cities, asks each configured operator for the
//! moves around the current pivot and applies improving moves until no
//! operator improves the tour from any pivot. Two selection policies are
//! supported:
//!
//! - First improvement applies the first move that shortens the tour by more
//!   than the improvement threshold and rescans the same pivot. The run ends
//!   after `n` consecutive pivots without an improving move.
//! - Best improvement scans all pivots and operators per pass and applies the
//!   single best move. Ties keep the move found first. The run ends when a
//!   pass finds nothing.
//!
//! A move must beat the larger of the configured threshold and the rounding
//! tolerance of the cost type at the current tour length. For integer costs
//! the tolerance is zero. For floating point costs it keeps moves whose delta
//! is only rounding noise from undoing each other forever.
//!
//! Monitors are consulted before every scan step, so an aborted run always
//! leaves a valid tour behind. The tour is improved in place.

use crate::{
    config::{ImprovementSelectionPolicy, SearchConfig},
    monitor::{
        local_search_monitor::{LocalSearchMonitor, SearchCommand},
        no_op::NoOpMonitor,
    },
    neighborhood::neighborhoods::Neighborhoods,
    operator::moves::Move,
    result::{LocalSearchOutcome, LocalSearchTerminationReason},
    stats::LocalSearchStatistics,
};
use std::time::Instant;
use waypoint_core::num::value::CostNumeric;
use waypoint_model::{cost::DistanceOracle, index::CityId, tour::Tour};

/// Local search engine over a fixed set of neighborhood operators.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiNeighborhoodSearchEngine<T> {
    config: SearchConfig<T>,
}

impl<T> Default for MultiNeighborhoodSearchEngine<T>
where
    T: CostNumeric,
{
    #[inline]
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<T> MultiNeighborhoodSearchEngine<T>
where
    T: CostNumeric,
{
    #[inline]
    pub fn new(config: SearchConfig<T>) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig<T> {
        &self.config
    }

    /// Returns the amount by which a move must shorten a tour of `length`
    /// to be applied.
    #[inline]
    pub fn acceptance_threshold(&self, length: T) -> T {
        let threshold = self.config.improvement_threshold();
        let tolerance = T::noise_tolerance(length);
        if tolerance > threshold { tolerance } else { threshold }
    }

    /// Improves `tour` until it is a local optimum with respect to every
    /// configured operator, without monitoring.
    pub fn optimize<D, N>(&self, tour: &mut Tour, oracle: &D, neighborhoods: &N) -> LocalSearchOutcome<T>
    where
        D: DistanceOracle<T> + ?Sized,
        N: Neighborhoods + ?Sized,
    {
        self.run(tour, oracle, neighborhoods, &mut NoOpMonitor::new())
    }

    /// Improves `tour` in place.
    ///
    /// Returns the outcome with the starting length, the final length and the
    /// run statistics. The final length is recomputed from the tour, so it is
    /// exact even for floating point costs.
    ///
    /// # Panics
    ///
    /// Panics if `tour`, `oracle` and `neighborhoods` disagree on the number of cities.
    #[tracing::instrument(
        level = "debug",
        name = "Multi-Neighborhood Search",
        skip_all,
        fields(num_cities = tour.len(), policy = %self.config.policy())
    )]
    pub fn run<D, N, M>(
        &self,
        tour: &mut Tour,
        oracle: &D,
        neighborhoods: &N,
        monitor: &mut M,
    ) -> LocalSearchOutcome<T>
    where
        D: DistanceOracle<T> + ?Sized,
        N: Neighborhoods + ?Sized,
        M: LocalSearchMonitor<T> + ?Sized,
    {
        assert!(
            tour.len() == oracle.num_cities() && tour.len() == neighborhoods.num_cities(),
            "called `MultiNeighborhoodSearchEngine::run` with inconsistent number of cities: tour has {}, oracle has {}, neighborhoods have {}",
            tour.len(),
            oracle.num_cities(),
            neighborhoods.num_cities()
        );

        let start_time = Instant::now();
        let mut stats = LocalSearchStatistics::with_operators(self.config.operators().len());
        let initial_length: T = tour.length(oracle);

        if tour.len() < 4 {
            tracing::warn!(
                num_cities = tour.len(),
                "tour has fewer than four cities, no operator can change it"
            );
        }

        monitor.on_start(tour, initial_length);

        let termination_reason = match self.config.policy() {
            ImprovementSelectionPolicy::FirstImprovement => {
                self.first_improvement(tour, oracle, neighborhoods, monitor, initial_length, &mut stats)
            }
            ImprovementSelectionPolicy::BestImprovement => {
                self.best_improvement(tour, oracle, neighborhoods, monitor, initial_length, &mut stats)
            }
        };

        let final_length: T = tour.length(oracle);
        stats.set_total_time(start_time.elapsed());
        monitor.on_end(tour, final_length, &stats);

        match termination_reason {
            LocalSearchTerminationReason::LocalOptimum => {
                tracing::debug!(
                    initial = %initial_length,
                    length = %final_length,
                    moves = stats.applied_moves,
                    "reached local optimum"
                );
                LocalSearchOutcome::local_optimum(initial_length, final_length, stats)
            }
            LocalSearchTerminationReason::Aborted(reason) => {
                tracing::debug!(%reason, length = %final_length, "local search aborted");
                LocalSearchOutcome::aborted(initial_length, final_length, reason, stats)
            }
        }
    }

    fn first_improvement<D, N, M>(
        &self,
        tour: &mut Tour,
        oracle: &D,
        neighborhoods: &N,
        monitor: &mut M,
        initial_length: T,
        stats: &mut LocalSearchStatistics,
    ) -> LocalSearchTerminationReason
    where
        D: DistanceOracle<T> + ?Sized,
        N: Neighborhoods + ?Sized,
        M: LocalSearchMonitor<T> + ?Sized,
    {
        let n = tour.len();
        let mut length = initial_length;
        let mut pivot_slot = 0usize;
        let mut pivots_without_improvement = 0usize;

        loop {
            if let SearchCommand::Terminate(reason) = monitor.search_command(stats) {
                break LocalSearchTerminationReason::Aborted(reason);
            }
            if pivots_without_improvement >= n {
                break LocalSearchTerminationReason::LocalOptimum;
            }

            stats.on_iteration();
            let pivot = CityId::from_slot(pivot_slot);

            let threshold = self.acceptance_threshold(length);
            match self.first_improving_move(tour, pivot, oracle, neighborhoods, threshold, stats) {
                Some((operator_index, mv)) => {
                    length = length + self.config.operators()[operator_index].apply(tour, &mv);
                    stats.on_applied_move(operator_index);
                    tracing::trace!(%mv, length = %length, "applied move");
                    monitor.on_move_applied(tour, &mv, length, stats);
                    // Rescan the same pivot in the changed tour.
                    pivots_without_improvement = 0;
                }
                None => {
                    pivots_without_improvement += 1;
                    pivot_slot += 1;
                    if pivot_slot == n {
                        pivot_slot = 0;
                        stats.on_sweep();
                        monitor.on_sweep(tour, stats);
                    }
                }
            }
        }
    }

    fn first_improving_move<D, N>(
        &self,
        tour: &Tour,
        pivot: CityId,
        oracle: &D,
        neighborhoods: &N,
        threshold: T,
        stats: &mut LocalSearchStatistics,
    ) -> Option<(usize, Move<T>)>
    where
        D: DistanceOracle<T> + ?Sized,
        N: Neighborhoods + ?Sized,
    {
        for (operator_index, operator) in self.config.operators().iter().enumerate() {
            for mv in operator.moves(tour, pivot, neighborhoods, oracle) {
                stats.on_evaluated_move();
                if mv.improves_by_more_than(threshold) {
                    return Some((operator_index, mv));
                }
            }
        }
        None
    }

    fn best_improvement<D, N, M>(
        &self,
        tour: &mut Tour,
        oracle: &D,
        neighborhoods: &N,
        monitor: &mut M,
        initial_length: T,
        stats: &mut LocalSearchStatistics,
    ) -> LocalSearchTerminationReason
    where
        D: DistanceOracle<T> + ?Sized,
        N: Neighborhoods + ?Sized,
        M: LocalSearchMonitor<T> + ?Sized,
    {
        let mut length = initial_length;

        loop {
            if let SearchCommand::Terminate(reason) = monitor.search_command(stats) {
                break LocalSearchTerminationReason::Aborted(reason);
            }

            let threshold = self.acceptance_threshold(length);
            let mut best: Option<(usize, Move<T>)> = None;
            for pivot_slot in 0..tour.len() {
                stats.on_iteration();
                let pivot = CityId::from_slot(pivot_slot);
                for (operator_index, operator) in self.config.operators().iter().enumerate() {
                    for mv in operator.moves(&*tour, pivot, neighborhoods, oracle) {
                        stats.on_evaluated_move();
                        if !mv.improves_by_more_than(threshold) {
                            continue;
                        }
                        let better = match &best {
                            Some((_, incumbent)) => mv.delta() < incumbent.delta(),
                            None => true,
                        };
                        if better {
                            best = Some((operator_index, mv));
                        }
                    }
                }
            }

            stats.on_sweep();
            monitor.on_sweep(tour, stats);

            let Some((operator_index, mv)) = best else {
                break LocalSearchTerminationReason::LocalOptimum;
            };

            length = length + self.config.operators()[operator_index].apply(tour, &mv);
            stats.on_applied_move(operator_index);
            tracing::trace!(%mv, length = %length, "applied move");
            monitor.on_move_applied(tour, &mv, length, stats);
        }
    }
}
