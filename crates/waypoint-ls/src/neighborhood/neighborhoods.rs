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

//! Neighborhood abstractions for candidate-restricted move generation.
//!
//! The `Neighborhoods` trait tells an operator which cities may become
//! adjacent to a pivot city. Every move the engine evaluates connects the
//! pivot to one of these neighbors, so the size of a neighborhood directly
//! bounds the work per pivot.
//!
//! Implementations expose contiguous, ascending slices of neighbors. Checked
//! and unchecked variants are provided to support hot-loop usage while keeping
//! clear contracts about bounds safety.

use waypoint_model::index::CityId;

/// A trait for defining which cities a pivot may be connected to.
pub trait Neighborhoods: std::fmt::Debug + Send + Sync {
    /// Returns the total number of cities in the problem instance.
    fn num_cities(&self) -> usize;

    /// Returns `true` if `b` is a neighbor of `a`.
    fn are_neighbors(&self, a: CityId, b: CityId) -> bool {
        assert!(
            a.slot() < self.num_cities(),
            "called `Neighborhoods::are_neighbors` with city out of bounds: the len is {} but the index is {}",
            self.num_cities(),
            a.get(),
        );

        assert!(
            b.slot() < self.num_cities(),
            "called `Neighborhoods::are_neighbors` with city out of bounds: the len is {} but the index is {}",
            self.num_cities(),
            b.get(),
        );

        unsafe { self.are_neighbors_unchecked(a, b) }
    }

    /// Returns `true` if `b` is a neighbor of `a`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `a` and `b` are within `1..=self.num_cities()`.
    unsafe fn are_neighbors_unchecked(&self, a: CityId, b: CityId) -> bool;

    /// Returns the neighbors of `city` in ascending id order.
    fn neighbors_of(&self, city: CityId) -> &[CityId] {
        assert!(
            city.slot() < self.num_cities(),
            "called `Neighborhoods::neighbors_of` with city out of bounds: the len is {} but the index is {}",
            self.num_cities(),
            city.get(),
        );

        unsafe { self.neighbors_of_unchecked(city) }
    }

    /// Returns the neighbors of `city` in ascending id order.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `city` is within `1..=self.num_cities()`.
    unsafe fn neighbors_of_unchecked(&self, city: CityId) -> &[CityId];
}

/// Every other city is a neighbor. Quadratic memory, meant for small instances and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullNeighborhoods {
    // Flattened adjacency lists.
    neighbors: Vec<CityId>,

    // The neighbors of the city in slot `i` are `neighbors[offsets[i]..offsets[i + 1]]`.
    // Length is `num_cities + 1`; the last entry equals `neighbors.len()`.
    offsets: Vec<usize>,
}

impl FullNeighborhoods {
    pub fn new(num_cities: usize) -> Self {
        let mut neighbors =
            Vec::with_capacity(num_cities.saturating_mul(num_cities.saturating_sub(1)));
        let mut offsets = Vec::with_capacity(num_cities + 1);

        offsets.push(0);
        for i in 0..num_cities {
            neighbors.extend(
                (0..num_cities)
                    .filter(|&j| j != i)
                    .map(CityId::from_slot),
            );
            offsets.push(neighbors.len());
        }

        Self { neighbors, offsets }
    }
}

impl Neighborhoods for FullNeighborhoods {
    #[inline]
    fn num_cities(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline(always)]
    unsafe fn are_neighbors_unchecked(&self, a: CityId, b: CityId) -> bool {
        a != b
    }

    #[inline(always)]
    unsafe fn neighbors_of_unchecked(&self, city: CityId) -> &[CityId] {
        let index = city.slot();

        debug_assert!(
            index < self.offsets.len() - 1,
            "called `FullNeighborhoods::neighbors_of_unchecked` with city out of bounds: the len is {} but the index is {}",
            self.offsets.len() - 1,
            city.get()
        );

        // SAFETY: `offsets` has `num_cities + 1` monotonic entries bounded by
        // `neighbors.len()`, and the caller guarantees `index < num_cities`.
        unsafe {
            let start = *self.offsets.get_unchecked(index);
            let end = *self.offsets.get_unchecked(index + 1);
            self.neighbors.get_unchecked(start..end)
        }
    }
}
