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

//! Outcome of a local search run.
//!
//! Bundles why the run stopped with the tour lengths before and after and the
//! run statistics. The tour itself is improved in place and is not part of the
//! outcome.

use crate::stats::LocalSearchStatistics;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocalSearchTerminationReason {
    /// No configured operator has an improving move for any pivot.
    LocalOptimum,

    /// A monitor stopped the search (time, move budget, etc.).
    /// The string contains information about the reason for abortion.
    Aborted(String),
}

impl std::fmt::Display for LocalSearchTerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalSearchTerminationReason::LocalOptimum => write!(f, "Local Optimum Reached"),
            LocalSearchTerminationReason::Aborted(msg) => write!(f, "Aborted: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalSearchOutcome<T> {
    termination_reason: LocalSearchTerminationReason,
    initial_length: T,
    final_length: T,
    statistics: LocalSearchStatistics,
}

impl<T> LocalSearchOutcome<T>
where
    T: Copy,
{
    /// Creates a new local optimum outcome.
    #[inline]
    pub fn local_optimum(initial_length: T, final_length: T, statistics: LocalSearchStatistics) -> Self {
        Self {
            termination_reason: LocalSearchTerminationReason::LocalOptimum,
            initial_length,
            final_length,
            statistics,
        }
    }

    /// Creates a new aborted outcome.
    #[inline]
    pub fn aborted<R>(
        initial_length: T,
        final_length: T,
        reason: R,
        statistics: LocalSearchStatistics,
    ) -> Self
    where
        R: Into<String>,
    {
        Self {
            termination_reason: LocalSearchTerminationReason::Aborted(reason.into()),
            initial_length,
            final_length,
            statistics,
        }
    }

    #[inline]
    pub fn termination_reason(&self) -> &LocalSearchTerminationReason {
        &self.termination_reason
    }

    /// Returns `true` if the run ended in a local optimum.
    #[inline]
    pub fn is_local_optimum(&self) -> bool {
        matches!(self.termination_reason, LocalSearchTerminationReason::LocalOptimum)
    }

    /// Returns the tour length the run started from.
    #[inline]
    pub fn initial_length(&self) -> T {
        self.initial_length
    }

    /// Returns the tour length the run ended with.
    #[inline]
    pub fn final_length(&self) -> T {
        self.final_length
    }

    #[inline]
    pub fn statistics(&self) -> &LocalSearchStatistics {
        &self.statistics
    }
}

impl<T> std::fmt::Display for LocalSearchOutcome<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (length {} -> {}, {} moves)",
            self.termination_reason, self.initial_length, self.final_length, self.statistics.applied_moves
        )
    }
}
