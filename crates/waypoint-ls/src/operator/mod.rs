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

//! Neighborhood operators for candidate-restricted tour improvement.
//!
//! Each operator enumerates moves around a pivot city, where every move makes
//! the pivot adjacent to one of its neighbors. Enumeration is lazy and only
//! reads the tour, so an engine can stop at the first improving move without
//! paying for the rest of the neighborhood. Moves are applied separately
//! through `NeighborhoodOperator::apply`.

pub mod moves;
pub mod or_move;
pub mod swap;
pub mod two_opt;

use crate::{
    neighborhood::neighborhoods::Neighborhoods,
    operator::{moves::Move, or_move::OrMoves, swap::SwapMoves, two_opt::TwoOptMoves},
};
use waypoint_core::num::value::CostNumeric;
use waypoint_model::{cost::DistanceOracle, index::CityId, tour::Tour};

/// The move types the search engine can scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeighborhoodOperator {
    /// Replace two edges by reversing the path between them.
    TwoOpt,
    /// Move a segment of up to `max_segment_len` cities next to a neighbor.
    OrMove { max_segment_len: usize },
    /// Like `OrMove`, but the segment is inserted back to front.
    ReversedOrMove { max_segment_len: usize },
    /// Exchange the pivot with a city adjacent to a neighbor.
    Swap,
}

impl NeighborhoodOperator {
    /// Returns the name of the operator for logging and identification purposes.
    pub fn name(&self) -> &'static str {
        match self {
            NeighborhoodOperator::TwoOpt => "TwoOpt",
            NeighborhoodOperator::OrMove { .. } => "OrMove",
            NeighborhoodOperator::ReversedOrMove { .. } => "ReversedOrMove",
            NeighborhoodOperator::Swap => "Swap",
        }
    }

    /// Returns the moves of this operator around `pivot`.
    ///
    /// # Panics
    ///
    /// Panics if `pivot` is not a city of `tour` or of `neighborhoods`.
    pub fn moves<'a, T, D, N>(
        &self,
        tour: &'a Tour,
        pivot: CityId,
        neighborhoods: &'a N,
        oracle: &'a D,
    ) -> OperatorMoves<'a, T, D>
    where
        T: CostNumeric,
        D: DistanceOracle<T> + ?Sized,
        N: Neighborhoods + ?Sized,
    {
        let neighbors = neighborhoods.neighbors_of(pivot);
        match *self {
            NeighborhoodOperator::TwoOpt => {
                OperatorMoves::TwoOpt(TwoOptMoves::new(tour, oracle, pivot, neighbors))
            }
            NeighborhoodOperator::OrMove { max_segment_len } => OperatorMoves::OrMove(
                OrMoves::new(tour, oracle, pivot, neighbors, max_segment_len, false),
            ),
            NeighborhoodOperator::ReversedOrMove { max_segment_len } => OperatorMoves::OrMove(
                OrMoves::new(tour, oracle, pivot, neighbors, max_segment_len, true),
            ),
            NeighborhoodOperator::Swap => {
                OperatorMoves::Swap(SwapMoves::new(tour, oracle, pivot, neighbors))
            }
        }
    }

    /// Applies `mv` to `tour` and returns its delta.
    #[inline]
    pub fn apply<T>(&self, tour: &mut Tour, mv: &Move<T>) -> T
    where
        T: CostNumeric,
    {
        mv.apply(tour)
    }
}

impl std::fmt::Display for NeighborhoodOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NeighborhoodOperator::OrMove { max_segment_len }
            | NeighborhoodOperator::ReversedOrMove { max_segment_len } => {
                write!(f, "{}({})", self.name(), max_segment_len)
            }
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// The move iterator of one operator around one pivot.
#[derive(Debug, Clone)]
pub enum OperatorMoves<'a, T, D: ?Sized> {
    TwoOpt(TwoOptMoves<'a, T, D>),
    OrMove(OrMoves<'a, T, D>),
    Swap(SwapMoves<'a, T, D>),
}

impl<T, D> Iterator for OperatorMoves<'_, T, D>
where
    T: CostNumeric,
    D: DistanceOracle<T> + ?Sized,
{
    type Item = Move<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            OperatorMoves::TwoOpt(it) => it.next(),
            OperatorMoves::OrMove(it) => it.next(),
            OperatorMoves::Swap(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            OperatorMoves::TwoOpt(it) => it.size_hint(),
            OperatorMoves::OrMove(it) => it.size_hint(),
            OperatorMoves::Swap(it) => it.size_hint(),
        }
    }
}
