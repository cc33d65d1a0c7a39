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

//! Candidate-restricted 2-opt.
//!
//! For a pivot `a` and each neighbor `c` two exchanges are generated. The
//! successor variant removes `(a, succ a)` and `(c, succ c)` and adds `(a, c)`
//! and `(succ a, succ c)`. The predecessor variant removes `(pred a, a)` and
//! `(pred c, c)` and adds `(a, c)` and `(pred a, pred c)`. Both reconnect the
//! tour by reversing the path between the two removed edges.
//!
//! The delta only accounts for the four edges involved, which is exact for
//! symmetric costs. Exchanges whose removed edges share a city change nothing
//! and are skipped.

use crate::operator::moves::{Move, MoveKind};
use std::marker::PhantomData;
use waypoint_core::num::value::CostNumeric;
use waypoint_model::{cost::DistanceOracle, index::CityId, tour::Tour};

/// Returns the delta of removing the edges leaving positions `first < second`
/// and reversing `first + 1..=second`.
#[inline]
pub fn two_opt_delta<T, D>(tour: &Tour, oracle: &D, first: usize, second: usize) -> T
where
    T: CostNumeric,
    D: DistanceOracle<T> + ?Sized,
{
    let a = tour.city_at(first);
    let b = tour.city_at(tour.next_position(first));
    let c = tour.city_at(second);
    let d = tour.city_at(tour.next_position(second));
    oracle.distance(a, c) + oracle.distance(b, d) - oracle.distance(a, b) - oracle.distance(c, d)
}

/// Lazily enumerates the 2-opt moves around one pivot.
#[derive(Debug, Clone)]
pub struct TwoOptMoves<'a, T, D: ?Sized> {
    tour: &'a Tour,
    oracle: &'a D,
    pivot: CityId,
    pivot_pos: usize,
    neighbors: &'a [CityId],
    cursor: usize,
    end: usize,
    _cost: PhantomData<fn() -> T>,
}

impl<'a, T, D> TwoOptMoves<'a, T, D>
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

impl<T, D> Iterator for TwoOptMoves<'_, T, D>
where
    T: CostNumeric,
    D: DistanceOracle<T> + ?Sized,
{
    type Item = Move<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.tour.len();
        while self.cursor < self.end {
            let c = self.neighbors[self.cursor / 2];
            let successor_variant = self.cursor % 2 == 0;
            self.cursor += 1;

            let pc = self.tour.position_of(c);
            let (p, q) = if successor_variant {
                (self.pivot_pos, pc)
            } else {
                (
                    self.tour.prev_position(self.pivot_pos),
                    self.tour.prev_position(pc),
                )
            };
            let (first, second) = if p < q { (p, q) } else { (q, p) };

            if second == first || second == first + 1 || (first == 0 && second == n - 1) {
                continue;
            }

            let delta = two_opt_delta(self.tour, self.oracle, first, second);
            return Some(Move::new(
                MoveKind::TwoOpt { first, second },
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

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_model::cost::DistanceMatrix;

    fn line_costs(n: usize) -> DistanceMatrix<i64> {
        DistanceMatrix::from_fn(n, |a, b| (a.get() as i64 - b.get() as i64).abs())
    }

    fn all_others(n: usize, pivot: usize) -> Vec<CityId> {
        (1..=n).filter(|&c| c != pivot).map(CityId::new).collect()
    }

    #[test]
    fn test_delta_matches_length_change() {
        let costs = line_costs(6);
        let tour = Tour::new([1, 4, 3, 2, 5, 6]).unwrap();
        let before = tour.length(&costs);
        let neighbors = all_others(6, 1);

        let moves: Vec<_> = TwoOptMoves::new(&tour, &costs, CityId::new(1), &neighbors).collect();
        assert!(!moves.is_empty());
        for m in moves {
            let mut t = tour.clone();
            m.apply(&mut t);
            assert_eq!(t.length(&costs), before + m.delta());
        }
    }

    #[test]
    fn test_finds_the_uncrossing_move() {
        let costs = line_costs(6);
        let tour = Tour::new([1, 4, 3, 2, 5, 6]).unwrap();
        let neighbors = vec![CityId::new(2)];
        let best = TwoOptMoves::new(&tour, &costs, CityId::new(1), &neighbors)
            .min_by_key(|m| m.delta())
            .unwrap();
        assert!(best.delta() < 0);

        let mut t = tour.clone();
        best.apply(&mut t);
        assert_eq!(t.to_ids(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_skips_adjacent_neighbors() {
        let costs = line_costs(5);
        let tour = Tour::identity(5);
        // 2 and 5 are next to the pivot, so every exchange with them shares a city
        let adjacent = vec![CityId::new(2), CityId::new(5)];
        assert_eq!(
            TwoOptMoves::new(&tour, &costs, CityId::new(1), &adjacent).count(),
            0
        );

        let neighbors = vec![CityId::new(2), CityId::new(3), CityId::new(5)];
        let moves: Vec<_> = TwoOptMoves::new(&tour, &costs, CityId::new(1), &neighbors).collect();
        for m in &moves {
            let MoveKind::TwoOpt { first, second } = *m.kind() else {
                panic!("unexpected move kind");
            };
            assert!(second > first + 1);
            assert!(!(first == 0 && second == 4));
        }
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn test_small_tours_have_no_moves() {
        let costs = line_costs(3);
        let tour = Tour::identity(3);
        let neighbors = all_others(3, 2);
        assert_eq!(
            TwoOptMoves::new(&tour, &costs, CityId::new(2), &neighbors).count(),
            0
        );
    }
}
