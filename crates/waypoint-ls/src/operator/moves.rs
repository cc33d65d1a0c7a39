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

//! Moves produced by neighborhood operators.
//!
//! A `Move` records what to change (`MoveKind`), which pivot city produced it
//! and the change in tour length it causes. Positions inside a move refer to
//! the tour the move was enumerated on and are only valid until that tour is
//! mutated.

use waypoint_core::num::value::CostNumeric;
use waypoint_model::{index::CityId, tour::Tour};

/// The structural change a move performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Remove the edges leaving positions `first` and `second` (`first < second`)
    /// and reconnect by reversing positions `first + 1..=second`.
    TwoOpt { first: usize, second: usize },

    /// Remove the `len` cities starting at `start` (wrapping around) and
    /// reinsert them directly after `after`, back to front if `reversed`.
    OrMove {
        start: usize,
        len: usize,
        after: CityId,
        reversed: bool,
    },

    /// Exchange the cities at positions `first` and `second`.
    Swap { first: usize, second: usize },
}

impl MoveKind {
    /// Performs the change on `tour`.
    pub fn apply(&self, tour: &mut Tour) {
        match *self {
            MoveKind::TwoOpt { first, second } => tour.reverse(first + 1, second),
            MoveKind::OrMove {
                start,
                len,
                after,
                reversed,
            } => tour.relocate_segment(start, len, after, reversed),
            MoveKind::Swap { first, second } => tour.swap(first, second),
        }
    }
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveKind::TwoOpt { first, second } => write!(f, "TwoOpt({}, {})", first, second),
            MoveKind::OrMove {
                start,
                len,
                after,
                reversed,
            } => write!(
                f,
                "OrMove(start: {}, len: {}, after: {}, reversed: {})",
                start, len, after, reversed
            ),
            MoveKind::Swap { first, second } => write!(f, "Swap({}, {})", first, second),
        }
    }
}

/// A candidate change to a tour together with its cost delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move<T> {
    kind: MoveKind,
    pivot: CityId,
    delta: T,
}

impl<T> Move<T>
where
    T: CostNumeric,
{
    #[inline]
    pub fn new(kind: MoveKind, pivot: CityId, delta: T) -> Self {
        Self { kind, pivot, delta }
    }

    #[inline]
    pub fn kind(&self) -> &MoveKind {
        &self.kind
    }

    /// Returns the city whose neighborhood produced the move.
    #[inline]
    pub fn pivot(&self) -> CityId {
        self.pivot
    }

    /// Returns `length(after) - length(before)`. Negative deltas improve the tour.
    #[inline]
    pub fn delta(&self) -> T {
        self.delta
    }

    /// Returns `true` if the move shortens the tour by more than `threshold`.
    #[inline]
    pub fn improves_by_more_than(&self, threshold: T) -> bool {
        self.delta < T::zero() - threshold
    }

    /// Performs the move on `tour` and returns its delta.
    #[inline]
    pub fn apply(&self, tour: &mut Tour) -> T {
        self.kind.apply(tour);
        self.delta
    }
}

impl<T> std::fmt::Display for Move<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {} (delta {})", self.kind, self.pivot, self.delta)
    }
}
