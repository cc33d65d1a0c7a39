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

//! Periodic progress logging through `tracing`.
//!
//! `LogMonitor` emits one `info` event per interval while a run is in progress
//! and one when it ends. The clock is only read on scan steps selected by the
//! check mask. Installing a subscriber is left to the application.

use crate::{
    monitor::local_search_monitor::LocalSearchMonitor, operator::moves::Move,
    stats::LocalSearchStatistics,
};
use std::time::{Duration, Instant};
use waypoint_core::num::value::CostNumeric;
use waypoint_model::tour::Tour;

#[derive(Debug, Clone)]
pub struct LogMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    initial_length: Option<T>,
    current_length: Option<T>,
}

impl<T> LogMonitor<T>
where
    T: CostNumeric,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            initial_length: None,
            current_length: None,
        }
    }

    /// Returns the most recent tour length seen by the monitor.
    #[inline]
    pub fn current_length(&self) -> Option<T> {
        self.current_length
    }

    fn log_line(&mut self, stats: &LocalSearchStatistics) {
        let now = Instant::now();
        let length = self
            .current_length
            .map_or_else(|| "-".to_string(), |l| l.to_string());
        tracing::info!(
            elapsed = %format!("{:.1}s", now.duration_since(self.start_time).as_secs_f32()),
            sweeps = stats.sweeps,
            evaluated = stats.evaluated_moves,
            applied = stats.applied_moves,
            length = %length,
            "local search progress"
        );
        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: CostNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 0x0FFF)
    }
}

impl<T> std::fmt::Display for LogMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> LocalSearchMonitor<T> for LogMonitor<T>
where
    T: CostNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_start(&mut self, tour: &Tour, length: T) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.initial_length = Some(length);
        self.current_length = Some(length);
        tracing::info!(cities = tour.len(), length = %length, "local search started");
    }

    fn on_end(&mut self, _tour: &Tour, length: T, statistics: &LocalSearchStatistics) {
        self.current_length = Some(length);
        let initial = self
            .initial_length
            .map_or_else(|| "-".to_string(), |l| l.to_string());
        tracing::info!(
            initial = %initial,
            length = %length,
            sweeps = statistics.sweeps,
            applied = statistics.applied_moves,
            time = ?statistics.time_total,
            "local search finished"
        );
    }

    fn on_sweep(&mut self, _tour: &Tour, statistics: &LocalSearchStatistics) {
        if (statistics.sweeps & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(statistics);
        }
    }

    fn on_move_applied(
        &mut self,
        _tour: &Tour,
        _mv: &Move<T>,
        length: T,
        statistics: &LocalSearchStatistics,
    ) {
        self.current_length = Some(length);
        if (statistics.applied_moves & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::moves::MoveKind;
    use waypoint_model::index::CityId;

    #[test]
    fn test_tracks_current_length() {
        let mut monitor = LogMonitor::<i64>::new(Duration::ZERO, 0);
        let tour = Tour::identity(4);
        monitor.on_start(&tour, 10);
        assert_eq!(monitor.current_length(), Some(10));

        let mv = Move::new(MoveKind::Swap { first: 0, second: 1 }, CityId::new(1), -2);
        let mut stats = LocalSearchStatistics::with_operators(1);
        stats.on_applied_move(0);
        monitor.on_move_applied(&tour, &mv, 8, &stats);
        assert_eq!(monitor.current_length(), Some(8));

        monitor.on_end(&tour, 8, &stats);
        assert_eq!(monitor.to_string(), "LogMonitor(log_interval: 0s, clock_check_mask: 0)");
    }
}
