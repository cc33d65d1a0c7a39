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

//! Tours as validated permutations of city ids.
//!
//! A `Tour` is a Hamiltonian cycle over cities `1..=n`, stored as the visiting
//! order plus an inverse index from city to position. Every mutating method
//! keeps the two in sync, so operators can jump from a candidate city to its
//! place in the tour in constant time. The tour is closed: the successor of the
//! last position is the first position.

use crate::{cost::DistanceOracle, index::CityId};
use fixedbitset::FixedBitSet;
use waypoint_core::num::value::CostNumeric;

/// The error type for tour construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourError {
    /// A tour must visit at least one city.
    Empty,
    /// A city id is zero or larger than the number of cities.
    CityOutOfRange { city: usize, num_cities: usize },
    /// A city appears more than once.
    DuplicateCity { city: usize },
}

impl std::fmt::Display for TourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "A tour must contain at least one city"),
            Self::CityOutOfRange { city, num_cities } => write!(
                f,
                "City {} is out of range for a tour over {} cities",
                city, num_cities
            ),
            Self::DuplicateCity { city } => write!(f, "City {} is visited more than once", city),
        }
    }
}

impl std::error::Error for TourError {}

/// A closed tour over cities `1..=n`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tour {
    order: Vec<CityId>,
    // positions[city.slot()] is the index of `city` in `order`.
    positions: Vec<usize>,
}

impl Tour {
    /// Creates a tour from raw one-based city ids.
    ///
    /// The ids must form a permutation of `1..=n` where `n` is the number of ids.
    pub fn new<I>(ids: I) -> Result<Self, TourError>
    where
        I: IntoIterator<Item = usize>,
    {
        let ids: Vec<usize> = ids.into_iter().collect();
        let n = ids.len();
        if n == 0 {
            return Err(TourError::Empty);
        }

        let mut seen = FixedBitSet::with_capacity(n);
        for &id in &ids {
            if id == 0 || id > n {
                return Err(TourError::CityOutOfRange {
                    city: id,
                    num_cities: n,
                });
            }
            if seen.put(id - 1) {
                return Err(TourError::DuplicateCity { city: id });
            }
        }

        Ok(Self::from_order(ids.into_iter().map(CityId::new).collect()))
    }

    /// Creates the tour `1, 2, ..., n`.
    ///
    /// # Panics
    ///
    /// Panics if `num_cities` is zero.
    pub fn identity(num_cities: usize) -> Self {
        assert!(
            num_cities > 0,
            "called `Tour::identity` with zero cities: a tour must contain at least one city"
        );
        Self::from_order((0..num_cities).map(CityId::from_slot).collect())
    }

    fn from_order(order: Vec<CityId>) -> Self {
        let mut tour = Self {
            positions: vec![0; order.len()],
            order,
        };
        tour.reindex(0, tour.order.len());
        tour
    }

    #[inline]
    fn reindex(&mut self, from: usize, to: usize) {
        for pos in from..to {
            self.positions[self.order[pos].slot()] = pos;
        }
    }

    /// Returns the number of cities on the tour.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.order.len()
    }

    /// Returns the number of cities on the tour.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always `false` for a constructed tour.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the city visited at position `pos`.
    #[inline]
    pub fn city_at(&self, pos: usize) -> CityId {
        assert!(
            pos < self.order.len(),
            "called `Tour::city_at` with position out of bounds: the len is {} but the index is {}",
            self.order.len(),
            pos
        );
        self.order[pos]
    }

    /// Returns the position of `city` on the tour.
    #[inline]
    pub fn position_of(&self, city: CityId) -> usize {
        let slot = city.slot();
        assert!(
            slot < self.positions.len(),
            "called `Tour::position_of` with city out of bounds: the len is {} but the index is {}",
            self.positions.len(),
            city.get()
        );
        self.positions[slot]
    }

    /// Returns the position following `pos`, wrapping around.
    #[inline]
    pub fn next_position(&self, pos: usize) -> usize {
        if pos + 1 == self.order.len() { 0 } else { pos + 1 }
    }

    /// Returns the position preceding `pos`, wrapping around.
    #[inline]
    pub fn prev_position(&self, pos: usize) -> usize {
        if pos == 0 { self.order.len() - 1 } else { pos - 1 }
    }

    /// Returns the city visited after `city`.
    #[inline]
    pub fn successor(&self, city: CityId) -> CityId {
        self.order[self.next_position(self.position_of(city))]
    }

    /// Returns the city visited before `city`.
    #[inline]
    pub fn predecessor(&self, city: CityId) -> CityId {
        self.order[self.prev_position(self.position_of(city))]
    }

    #[inline]
    pub fn as_slice(&self) -> &[CityId] {
        &self.order
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, CityId> {
        self.order.iter()
    }

    /// Returns the raw one-based ids in visiting order.
    pub fn to_ids(&self) -> Vec<usize> {
        self.order.iter().map(CityId::get).collect()
    }

    /// Returns the length of the closed tour under `oracle`.
    pub fn length<T, D>(&self, oracle: &D) -> T
    where
        T: CostNumeric,
        D: DistanceOracle<T> + ?Sized,
    {
        let n = self.order.len();
        (0..n).fold(T::zero(), |acc, pos| {
            acc + oracle.distance(self.order[pos], self.order[self.next_position(pos)])
        })
    }

    /// Returns `true` if both tours describe the same undirected cycle,
    /// regardless of starting city and direction.
    pub fn is_same_cycle(&self, other: &Tour) -> bool {
        if self.order.len() != other.order.len() {
            return false;
        }
        let n = self.order.len();
        let anchor = self.order[0];
        if anchor.slot() >= other.positions.len() {
            return false;
        }
        let offset = other.position_of(anchor);
        let forward = (0..n).all(|k| self.order[k] == other.order[(offset + k) % n]);
        let backward = (0..n).all(|k| self.order[k] == other.order[(offset + n - k) % n]);
        forward || backward
    }

    /// Reverses the cities at positions `i..=j`.
    ///
    /// # Panics
    ///
    /// Panics if `i > j` or `j` is out of bounds.
    pub fn reverse(&mut self, i: usize, j: usize) {
        assert!(
            i <= j && j < self.order.len(),
            "called `Tour::reverse` with invalid range: the len is {} but the range is {}..={}",
            self.order.len(),
            i,
            j
        );
        self.order[i..=j].reverse();
        self.reindex(i, j + 1);
    }

    /// Exchanges the cities at positions `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) {
        let n = self.order.len();
        assert!(
            i < n && j < n,
            "called `Tour::swap` with position out of bounds: the len is {} but the indices are {} and {}",
            n,
            i,
            j
        );
        self.order.swap(i, j);
        self.positions[self.order[i].slot()] = i;
        self.positions[self.order[j].slot()] = j;
    }

    /// Moves the `len` cities starting at position `start` (wrapping around the
    /// end of the tour) so that they directly follow `after`. When `reversed` is
    /// set the segment is inserted back to front.
    ///
    /// # Panics
    ///
    /// Panics if the segment is empty, spans the whole tour, or contains `after`.
    pub fn relocate_segment(&mut self, start: usize, len: usize, after: CityId, reversed: bool) {
        let n = self.order.len();
        assert!(
            start < n && len >= 1 && len < n,
            "called `Tour::relocate_segment` with invalid segment: the len is {} but the segment is {} cities from {}",
            n,
            len,
            start
        );
        let in_segment = |pos: usize| (pos + n - start) % n < len;
        assert!(
            !in_segment(self.position_of(after)),
            "called `Tour::relocate_segment` with {} inside the relocated segment",
            after
        );

        let mut segment: Vec<CityId> = (0..len).map(|k| self.order[(start + k) % n]).collect();
        if reversed {
            segment.reverse();
        }

        let mut rebuilt = Vec::with_capacity(n);
        for pos in 0..n {
            if in_segment(pos) {
                continue;
            }
            let city = self.order[pos];
            rebuilt.push(city);
            if city == after {
                rebuilt.extend_from_slice(&segment);
            }
        }

        self.order = rebuilt;
        self.reindex(0, n);
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tour(")?;
        for (k, city) in self.order.iter().enumerate() {
            if k > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", city.get())?;
        }
        write!(f, ")")
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = TourError;

    fn try_from(ids: Vec<usize>) -> Result<Self, Self::Error> {
        Tour::new(ids)
    }
}

impl<'a> IntoIterator for &'a Tour {
    type Item = &'a CityId;
    type IntoIter = std::slice::Iter<'a, CityId>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::DistanceMatrix;

    fn ids(t: &Tour) -> Vec<usize> {
        t.to_ids()
    }

    fn assert_consistent(t: &Tour) {
        for (pos, city) in t.iter().enumerate() {
            assert_eq!(t.position_of(*city), pos);
        }
    }

    #[test]
    fn test_new_accepts_permutation() {
        let t = Tour::new([3, 1, 2]).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(ids(&t), vec![3, 1, 2]);
        assert_eq!(t.position_of(CityId::new(1)), 1);
        assert_consistent(&t);
    }

    #[test]
    fn test_new_rejects_invalid_input() {
        assert_eq!(Tour::new(Vec::<usize>::new()), Err(TourError::Empty));
        assert_eq!(
            Tour::new([1, 4, 2]),
            Err(TourError::CityOutOfRange {
                city: 4,
                num_cities: 3
            })
        );
        assert_eq!(
            Tour::new([0, 1]),
            Err(TourError::CityOutOfRange {
                city: 0,
                num_cities: 2
            })
        );
        assert_eq!(
            Tour::new([1, 2, 2]),
            Err(TourError::DuplicateCity { city: 2 })
        );
    }

    #[test]
    fn test_successor_and_predecessor_wrap() {
        let t = Tour::new([2, 4, 1, 3]).unwrap();
        assert_eq!(t.successor(CityId::new(3)), CityId::new(2));
        assert_eq!(t.predecessor(CityId::new(2)), CityId::new(3));
        assert_eq!(t.successor(CityId::new(4)), CityId::new(1));
    }

    #[test]
    fn test_length_closes_the_cycle() {
        let d = DistanceMatrix::from_fn(4, |a, b| (a.get() as i64 - b.get() as i64).abs());
        let t = Tour::identity(4);
        // 1 + 1 + 1 + 3
        assert_eq!(t.length(&d), 6);
    }

    #[test]
    fn test_reverse_updates_positions() {
        let mut t = Tour::identity(6);
        t.reverse(1, 4);
        assert_eq!(ids(&t), vec![1, 5, 4, 3, 2, 6]);
        assert_consistent(&t);
    }

    #[test]
    fn test_swap_updates_positions() {
        let mut t = Tour::identity(5);
        t.swap(0, 4);
        assert_eq!(ids(&t), vec![5, 2, 3, 4, 1]);
        assert_consistent(&t);
    }

    #[test]
    fn test_relocate_segment_forward_and_reversed() {
        let mut t = Tour::identity(7);
        t.relocate_segment(1, 2, CityId::new(5), false);
        assert_eq!(ids(&t), vec![1, 4, 5, 2, 3, 6, 7]);
        assert_consistent(&t);

        let mut t = Tour::identity(7);
        t.relocate_segment(1, 2, CityId::new(5), true);
        assert_eq!(ids(&t), vec![1, 4, 5, 3, 2, 6, 7]);
        assert_consistent(&t);
    }

    #[test]
    fn test_relocate_segment_wrapping_around() {
        let mut t = Tour::identity(6);
        // segment [6, 1]
        t.relocate_segment(5, 2, CityId::new(3), false);
        assert_eq!(ids(&t), vec![2, 3, 6, 1, 4, 5]);
        assert_consistent(&t);
    }

    #[test]
    #[should_panic(expected = "inside the relocated segment")]
    fn test_relocate_segment_rejects_anchor_inside() {
        let mut t = Tour::identity(6);
        t.relocate_segment(1, 3, CityId::new(3), false);
    }

    #[test]
    fn test_is_same_cycle_ignores_rotation_and_direction() {
        let a = Tour::new([1, 2, 3, 4, 5]).unwrap();
        let rotated = Tour::new([3, 4, 5, 1, 2]).unwrap();
        let mirrored = Tour::new([1, 5, 4, 3, 2]).unwrap();
        let other = Tour::new([1, 3, 2, 4, 5]).unwrap();
        assert!(a.is_same_cycle(&rotated));
        assert!(a.is_same_cycle(&mirrored));
        assert!(!a.is_same_cycle(&other));
        assert_ne!(a, rotated);
    }

    #[test]
    fn test_display() {
        let t = Tour::new([2, 1, 3]).unwrap();
        assert_eq!(format!("{}", t), "Tour(2 -> 1 -> 3)");
    }

    #[test]
    #[should_panic(expected = "called `Tour::city_at` with position out of bounds")]
    fn test_city_at_out_of_bounds_panics() {
        let t = Tour::identity(3);
        let _ = t.city_at(3);
    }
}
