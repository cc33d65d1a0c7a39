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

//! Candidate-restricted city swap.
//!
//! For a pivot `a` and each neighbor `c`, the pivot trades places with the
//! city right after `c` or the city right before `c`, which leaves `a`
//! adjacent to `c`. Swapping two cities touches at most four tour edges.

use crate::operator::moves::{Move, MoveKind};
use smallvec::SmallVec;
use std::marker::PhantomData;
use waypoint_core::num::value::CostNumeric;
use waypoint_model::{cost::DistanceOracle, index::CityId, tour::Tour};

/// Returns the delta of exchanging the cities at positions `i` and `j`.
pub fn swap_delta<T, D>(tour: &Tour, oracle: &D, i: usize, j: usize) -> T
where
    T: CostNumeric,
    D: DistanceOracle<T> + ?Sized,
{
    debug_assert!(
        i != j && i < tour.len() && j < tour.len(),
        "called `swap_delta` with invalid positions: the len is {} but the positions are {} and {}",
        tour.len(),
        i,
        j
    );

    let mut starts: SmallVec<[usize; 4]> = SmallVec::new();
    for p in [tour.prev_position(i), i, tour.prev_position(j), j] {
        if !starts.contains(&p) {
            starts.push(p);
        }
    }

    let swapped = |p: usize| {
        if p == i {
            tour.city_at(j)
        } else if p == j {
            tour.city_at(i)
        } else {
            tour.city_at(p)
        }
    };

    let mut delta = T::zero();
    for &p in &starts {
        let q = tour.next_position(p);
        delta = delta + oracle.distance(swapped(p), swapped(q))
            - oracle.distance(tour.city_at(p), tour.city_at(q));
    }
    delta
}

/// Lazily enumerates the swap moves around one pivot.
#[derive(Debug, Clone)]
pub struct SwapMoves<'a, T, D: ?Sized> {
    tour: &'a Tour,
    oracle: &'a D,
    pivot: CityId,
    pivot_pos: usize,
    neighbors: &'a [CityId],
    cursor: usize,
    end: usize,
    _cost: PhantomData<fn() -> T>,
}

impl<'a, T, D> SwapMoves<'a, T, D>
where
    T: CostNumeric,
    D: DistanceOracle<T> + ?Sized,
{
    pub fn new(tour: &'a Tour, oracle: &'a D, pivot: CityId, neighbors: &'a [CityId]) -> Self {
        let end = if tour.len() < 4 { 0 } else { neighbors.len() * 2 };
        Self {
            tour,
            oracle,
            pivot,
            pivot_pos: tour.position_of(pivot),
            neighbors,
            cursor: 0,
            end,
            _cost: PhantomData,
        }
    }
}

impl<T, D> Iterator for SwapMoves<'_, T, D>
where
    T: CostNumeric,
    D: DistanceOracle<T> + ?Sized,
{
    type Item = Move<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let m = self.neighbors.len();
        while self.cursor < self.end {
            let c = self.neighbors[self.cursor % m];
            let after_c = self.cursor < m;
            self.cursor += 1;

            let pc = self.tour.position_of(c);
            let target = if after_c {
                self.tour.next_position(pc)
            } else {
                self.tour.prev_position(pc)
            };
            if target == self.pivot_pos {
                continue;
            }

            let delta = swap_delta(self.tour, self.oracle, self.pivot_pos, target);
            return Some(Move::new(
                MoveKind::Swap {
                    first: self.pivot_pos.min(target),
                    second: self.pivot_pos.max(target),
                },
                self.pivot,
                delta,
            ));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.end - self.cursor))
    }
}
