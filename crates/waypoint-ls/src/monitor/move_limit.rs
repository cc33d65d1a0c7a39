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

use crate::{
    monitor::local_search_monitor::{LocalSearchMonitor, SearchCommand},
    operator::moves::Move,
    stats::LocalSearchStatistics,
};
use waypoint_core::num::value::CostNumeric;
use waypoint_model::tour::Tour;

/// Terminates a local search once a number of moves has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveLimitMonitor {
    max_moves: u64,
}

impl MoveLimitMonitor {
    #[inline]
    pub fn new(max_moves: u64) -> Self {
        Self { max_moves }
    }

    #[inline]
    pub fn max_moves(&self) -> u64 {
        self.max_moves
    }
}

impl<T> LocalSearchMonitor<T> for MoveLimitMonitor
where
    T: CostNumeric,
{
    fn name(&self) -> &str {
        "MoveLimitMonitor"
    }

    fn on_start(&mut self, _tour: &Tour, _length: T) {}

    fn on_end(&mut self, _tour: &Tour, _length: T, _statistics: &LocalSearchStatistics) {}

    fn on_sweep(&mut self, _tour: &Tour, _statistics: &LocalSearchStatistics) {}

    fn on_move_applied(
        &mut self,
        _tour: &Tour,
        _mv: &Move<T>,
        _length: T,
        _statistics: &LocalSearchStatistics,
    ) {
    }

    fn search_command(&mut self, statistics: &LocalSearchStatistics) -> SearchCommand {
        if statistics.applied_moves >= self.max_moves {
            return SearchCommand::Terminate(format!("move limit of {} reached", self.max_moves));
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminates_at_limit() {
        let mut monitor = MoveLimitMonitor::new(2);
        let mut stats = LocalSearchStatistics::with_operators(1);
        stats.on_applied_move(0);
        assert_eq!(
            LocalSearchMonitor::<i32>::search_command(&mut monitor, &stats),
            SearchCommand::Continue
        );
        stats.on_applied_move(0);
        assert_eq!(
            LocalSearchMonitor::<i32>::search_command(&mut monitor, &stats),
            SearchCommand::Terminate("move limit of 2 reached".to_string())
        );
    }
}
