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

/// Forwards every hook to a list of monitors, in insertion order.
#[derive(Default)]
pub struct CompositeLocalSearchMonitor<'a, T>
where
    T: CostNumeric,
{
    monitors: Vec<Box<dyn LocalSearchMonitor<T> + 'a>>,
}

impl<'a, T> CompositeLocalSearchMonitor<'a, T>
where
    T: CostNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: LocalSearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn add_boxed_monitor(&mut self, monitor: Box<dyn LocalSearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn monitors(&self) -> &[Box<dyn LocalSearchMonitor<T> + 'a>] {
        &self.monitors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<T> std::fmt::Debug for CompositeLocalSearchMonitor<'_, T>
where
    T: CostNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeLocalSearchMonitor")
            .field("monitors", &self.monitors)
            .finish()
    }
}

impl<T> LocalSearchMonitor<T> for CompositeLocalSearchMonitor<'_, T>
where
    T: CostNumeric,
{
    fn name(&self) -> &str {
        "CompositeLocalSearchMonitor"
    }

    fn on_start(&mut self, tour: &Tour, length: T) {
        for m in &mut self.monitors {
            m.on_start(tour, length);
        }
    }

    fn on_end(&mut self, tour: &Tour, length: T, statistics: &LocalSearchStatistics) {
        for m in &mut self.monitors {
            m.on_end(tour, length, statistics);
        }
    }

    fn on_sweep(&mut self, tour: &Tour, statistics: &LocalSearchStatistics) {
        for m in &mut self.monitors {
            m.on_sweep(tour, statistics);
        }
    }

    fn on_move_applied(
        &mut self,
        tour: &Tour,
        mv: &Move<T>,
        length: T,
        statistics: &LocalSearchStatistics,
    ) {
        for m in &mut self.monitors {
            m.on_move_applied(tour, mv, length, statistics);
        }
    }

    fn search_command(&mut self, statistics: &LocalSearchStatistics) -> SearchCommand {
        for m in &mut self.monitors {
            match m.search_command(statistics) {
                SearchCommand::Continue => continue,
                // First terminate request wins
                SearchCommand::Terminate(msg) => return SearchCommand::Terminate(msg),
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{move_limit::MoveLimitMonitor, no_op::NoOpMonitor};

    #[test]
    fn test_first_terminate_wins() {
        let mut composite = CompositeLocalSearchMonitor::<i64>::new();
        composite.add_monitor(NoOpMonitor::new());
        composite.add_monitor(MoveLimitMonitor::new(0));
        composite.add_monitor(MoveLimitMonitor::new(1));
        assert_eq!(composite.len(), 3);

        let stats = LocalSearchStatistics::default();
        assert_eq!(
            composite.search_command(&stats),
            SearchCommand::Terminate("move limit of 0 reached".to_string())
        );
    }

    #[test]
    fn test_borrowed_monitors() {
        let mut limit = MoveLimitMonitor::new(1);
        {
            let mut composite = CompositeLocalSearchMonitor::<i32>::new();
            composite.add_monitor(&mut limit);
            let mut stats = LocalSearchStatistics::with_operators(1);
            stats.on_applied_move(0);
            assert!(matches!(
                composite.search_command(&stats),
                SearchCommand::Terminate(_)
            ));
        }
        assert_eq!(limit.max_moves(), 1);
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut composite = CompositeLocalSearchMonitor::<f64>::with_capacity(2);
        assert!(composite.is_empty());
        assert_eq!(
            composite.search_command(&LocalSearchStatistics::default()),
            SearchCommand::Continue
        );
    }
}
