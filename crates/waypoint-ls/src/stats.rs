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

//! Counters collected during a local search run.
//!
//! Updates use saturating arithmetic so that a long run never traps on
//! overflow, and every hook is small enough to inline into the scan loop.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LocalSearchStatistics {
    /// Number of pivot scan steps performed.
    pub iterations: u64,

    /// Number of completed sweeps over all pivot cities.
    pub sweeps: u64,

    /// Number of moves whose delta was evaluated.
    pub evaluated_moves: u64,

    /// Number of moves applied to the tour.
    pub applied_moves: u64,

    /// Applied moves per operator, in the order the operators were configured.
    pub applied_per_operator: Vec<u64>,

    /// Total time taken by the local search.
    pub time_total: Duration,
}

impl LocalSearchStatistics {
    /// Creates empty statistics for a run with `num_operators` operators.
    #[inline]
    pub fn with_operators(num_operators: usize) -> Self {
        Self {
            applied_per_operator: vec![0; num_operators],
            ..Self::default()
        }
    }

    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    #[inline]
    pub fn on_sweep(&mut self) {
        self.sweeps = self.sweeps.saturating_add(1);
    }

    #[inline]
    pub fn on_evaluated_move(&mut self) {
        self.evaluated_moves = self.evaluated_moves.saturating_add(1);
    }

    /// Called when a move of the operator at `operator_index` is applied.
    #[inline]
    pub fn on_applied_move(&mut self, operator_index: usize) {
        self.applied_moves = self.applied_moves.saturating_add(1);
        if let Some(count) = self.applied_per_operator.get_mut(operator_index) {
            *count = count.saturating_add(1);
        }
    }

    /// Sets the total time taken by the local search.
    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn rejected_moves(&self) -> u64 {
        self.evaluated_moves.saturating_sub(self.applied_moves)
    }
}

impl std::fmt::Display for LocalSearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Waypoint-LS Statistics:")?;
        writeln!(f, "   Iterations:       {}", self.iterations)?;
        writeln!(f, "   Sweeps:           {}", self.sweeps)?;
        writeln!(f, "   Evaluated Moves:  {}", self.evaluated_moves)?;
        writeln!(f, "   Applied Moves:    {}", self.applied_moves)?;
        writeln!(f, "   Rejected Moves:   {}", self.rejected_moves())?;
        writeln!(f, "   Per Operator:     {:?}", self.applied_per_operator)?;
        writeln!(f, "   Total Time:       {:?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = LocalSearchStatistics::with_operators(2);
        stats.on_iteration();
        stats.on_sweep();
        stats.on_evaluated_move();
        stats.on_evaluated_move();
        stats.on_evaluated_move();
        stats.on_applied_move(1);
        stats.on_applied_move(7);

        assert_eq!(stats.iterations, 1);
        assert_eq!(stats.sweeps, 1);
        assert_eq!(stats.applied_moves, 2);
        assert_eq!(stats.applied_per_operator, vec![0, 1]);
        assert_eq!(stats.rejected_moves(), 1);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = LocalSearchStatistics {
            iterations: u64::MAX,
            ..LocalSearchStatistics::default()
        };
        stats.on_iteration();
        assert_eq!(stats.iterations, u64::MAX);
    }

    #[test]
    fn test_display_lists_counters() {
        let stats = LocalSearchStatistics::with_operators(1);
        let text = stats.to_string();
        assert!(text.contains("Applied Moves:    0"));
        assert!(text.contains("Per Operator:     [0]"));
    }
}
