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

//! Time-based termination for local search.
//!
//! Clock checks are throttled with a mask over the iteration counter; the
//! clock is only read when the masked value is zero. The default mask `0x0FFF`
//! checks roughly every 4096 scan steps. The start time is reset in
//! `on_start`, so one monitor can be reused across runs.

use crate::{
    monitor::local_search_monitor::{LocalSearchMonitor, SearchCommand},
    operator::moves::Move,
    stats::LocalSearchStatistics,
};
use std::time::{Duration, Instant};
use waypoint_core::num::value::CostNumeric;
use waypoint_model::tour::Tour;

/// Terminates a local search after a fixed wall-clock duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    start_time: Instant,
    time_limit: Duration,
    clock_check_mask: u64,
}

impl TimeLimitMonitor {
    /// Checks the clock every 4096 steps.
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x0FFF;

    pub fn new(time_limit: Duration) -> Self {
        Self::with_mask(time_limit, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    /// Lower mask values check more often; higher values check less often.
    pub fn with_mask(time_limit: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            time_limit,
            clock_check_mask,
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<T> LocalSearchMonitor<T> for TimeLimitMonitor
where
    T: CostNumeric,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_start(&mut self, _tour: &Tour, _length: T) {
        self.start_time = Instant::now();
    }

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
        if (statistics.iterations & self.clock_check_mask) == 0
            && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit exceeded".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_terminates_on_masked_step() {
        let mut monitor = TimeLimitMonitor::with_mask(Duration::ZERO, 0x3);
        LocalSearchMonitor::<i64>::on_start(&mut monitor, &Tour::identity(3), 0);

        let mut stats = LocalSearchStatistics::default();
        stats.iterations = 1;
        assert_eq!(
            LocalSearchMonitor::<i64>::search_command(&mut monitor, &stats),
            SearchCommand::Continue
        );
        stats.iterations = 4;
        assert_eq!(
            LocalSearchMonitor::<i64>::search_command(&mut monitor, &stats),
            SearchCommand::Terminate("time limit exceeded".to_string())
        );
    }

    #[test]
    fn test_generous_limit_continues() {
        let mut monitor = TimeLimitMonitor::new(Duration::from_secs(3600));
        assert_eq!(
            LocalSearchMonitor::<f64>::search_command(&mut monitor, &LocalSearchStatistics::default()),
            SearchCommand::Continue
        );
    }
}
