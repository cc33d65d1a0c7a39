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

//! Monitoring interface for local search runs.
//!
//! Hooks are called at the start and end of a run, after each completed sweep
//! over the pivot cities and after each applied move. The engine asks
//! `search_command` before every pivot scan step, when the tour is consistent,
//! so a monitor that returns `SearchCommand::Terminate` always leaves a valid
//! tour behind. The default `search_command` continues.

use crate::{operator::moves::Move, stats::LocalSearchStatistics};
use waypoint_core::num::value::CostNumeric;
use waypoint_model::tour::Tour;

/// The decision a monitor returns before each scan step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// A monitor for local search runs.
pub trait LocalSearchMonitor<T>
where
    T: CostNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called before the first scan step with the starting tour and its length.
    fn on_start(&mut self, tour: &Tour, length: T);

    /// Called once the run has stopped, with the final tour and its length.
    fn on_end(&mut self, tour: &Tour, length: T, statistics: &LocalSearchStatistics);

    /// Called after every completed sweep over all pivot cities.
    fn on_sweep(&mut self, tour: &Tour, statistics: &LocalSearchStatistics);

    /// Called after `mv` has been applied. `length` is the new tour length.
    fn on_move_applied(
        &mut self,
        tour: &Tour,
        mv: &Move<T>,
        length: T,
        statistics: &LocalSearchStatistics,
    );

    /// Determines the command for the next step of the local search.
    fn search_command(&mut self, _statistics: &LocalSearchStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl<T, M> LocalSearchMonitor<T> for &mut M
where
    T: CostNumeric,
    M: LocalSearchMonitor<T> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_start(&mut self, tour: &Tour, length: T) {
        (**self).on_start(tour, length)
    }

    fn on_end(&mut self, tour: &Tour, length: T, statistics: &LocalSearchStatistics) {
        (**self).on_end(tour, length, statistics)
    }

    fn on_sweep(&mut self, tour: &Tour, statistics: &LocalSearchStatistics) {
        (**self).on_sweep(tour, statistics)
    }

    fn on_move_applied(
        &mut self,
        tour: &Tour,
        mv: &Move<T>,
        length: T,
        statistics: &LocalSearchStatistics,
    ) {
        (**self).on_move_applied(tour, mv, length, statistics)
    }

    fn search_command(&mut self, statistics: &LocalSearchStatistics) -> SearchCommand {
        (**self).search_command(statistics)
    }
}

impl<T> std::fmt::Debug for dyn LocalSearchMonitor<T> + '_
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LocalSearchMonitor {{ name: {} }}", self.name())
    }
}

impl<T> std::fmt::Display for dyn LocalSearchMonitor<T> + '_
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LocalSearchMonitor: {}", self.name())
    }
}
