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

//! Candidate-restricted segment relocation (Or-opt).
//!
//! Segments of `1..=k` consecutive cities that start or end at the pivot are
//! cut out and reinserted next to one of the pivot's neighbors, with the pivot
//! end of the segment touching that neighbor. The plain variant keeps the
//! segment's orientation. The reversed variant inserts it back to front, which
//! only differs from the plain variant for segments of two or more cities.
//!
//! Segments are at most `n - 3` cities long so that the remaining tour keeps at
//! least three cities to insert between. The delta of the reversed variant
//! assumes symmetric costs inside the segment.

use crate::operator::moves::{Move, MoveKind};
use std::marker::PhantomData;
use waypoint_core::num::value::CostNumeric;
use waypoint_model::{cost::DistanceOracle, index::CityId, tour::Tour};

/// Lazily enumerates the segment relocations around one pivot.
///
/// Moves are produced by segment length first, then by which end of the
/// segment the pivot is, then by neighbor.
#[derive(Debug, Clone)]
pub struct OrMoves<'a, T, D: ?Sized> {
    tour: &'a Tour,
    oracle: &'a D,
    pivot: CityId,
    pivot_pos: usize,
    neighbors: &'a [CityId],
    min_len: usize,
    reversed: bool,
    cursor: usize,
    end: usize,
    _cost: PhantomData<fn() -> T>,
}

impl<'a, T, D> OrMoves<'a, T, D>
where
    T: CostNumeric,
    D: DistanceOracle<T> + ?Sized,
{
    pub fn new(
        tour: &'a Tour,
        oracle: &'a D,
        pivot: CityId,
        neighbors: &'a [CityId],
        max_segment_len: usize,
        reversed: bool,
    ) -> Self {
        let min_len = if reversed { 2 } else { 1 };
        let max_len = max_segment_len.min(tour.len().saturating_sub(3));
        let end = if max_len < min_len {
            0
        } else {
            (max_len - min_len + 1) * 2 * neighbors.len()
        };
        Self {
            tour,
            oracle,
            pivot,
            pivot_pos: tour.position_of(pivot),
            neighbors,
            min_len,
            reversed,
            cursor: 0,
            end,
            _cost: PhantomData,
        }
    }

    fn evaluate(&self, len: usize, pivot_first: bool, c: CityId) -> Option<Move<T>> {
        let tour = self.tour;
        let n = tour.len();
        let start = if pivot_first {
            self.pivot_pos
        } else {
            (self.pivot_pos + n + 1 - len) % n
        };
        let last = (start + len - 1) % n;

        if (tour.position_of(c) + n - start) % n < len {
            return None;
        }

        let seg_first = tour.city_at(start);
        let seg_last = tour.city_at(last);
        let prev = tour.city_at(tour.prev_position(start));
        let next = tour.city_at(tour.next_position(last));

        // (x, y) is the edge of the tour without the segment that receives it.
        let (x, y) = if pivot_first != self.reversed {
            let after_c = if c == prev { next } else { tour.successor(c) };
            (c, after_c)
        } else {
            let before_c = if c == next { prev } else { tour.predecessor(c) };
            (before_c, c)
        };

        if !self.reversed && x == prev && y == next {
            return None;
        }

        let (head, tail) = if self.reversed {
            (seg_last, seg_first)
        } else {
            (seg_first, seg_last)
        };
        let d = |u: CityId, v: CityId| self.oracle.distance(u, v);
        let delta = d(prev, next) + d(x, head) + d(tail, y)
            - d(prev, seg_first)
            - d(seg_last, next)
            - d(x, y);

        Some(Move::new(
            MoveKind::OrMove {
                start,
                len,
                after: x,
                reversed: self.reversed,
            },
            self.pivot,
            delta,
        ))
    }
}

impl<T, D> Iterator for OrMoves<'_, T, D>
where
    T: CostNumeric,
    D: DistanceOracle<T> + ?Sized,
{
    type Item = Move<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let m = self.neighbors.len();
        while self.cursor < self.end {
            let c = self.neighbors[self.cursor % m];
            let group = self.cursor / m;
            let pivot_first = group % 2 == 0;
            let len = self.min_len + group / 2;
            self.cursor += 1;

            if let Some(mv) = self.evaluate(len, pivot_first, c) {
                return Some(mv);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.end - self.cursor))
    }
}
