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

//! Random tour perturbations used to escape a local optimum.
//!
//! Every perturbation works on one random segment and, whenever the tour is
//! large enough for the requested segment, yields a tour that differs from
//! the input as a city sequence.

use rand::Rng;
use waypoint_model::tour::Tour;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Perturbation {
    /// Reverse a random segment in place.
    ReverseSegment,
    /// Move a random segment behind a random city outside of it.
    RelocateSegment,
    /// Cyclically permute the cities of a random segment so that each one
    /// ends up at a different position.
    ShuffleSegment,
}

impl Perturbation {
    pub const ALL: [Perturbation; 3] = [
        Perturbation::ReverseSegment,
        Perturbation::RelocateSegment,
        Perturbation::ShuffleSegment,
    ];

    /// Picks one of the perturbations uniformly at random.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Perturbation::ReverseSegment => "ReverseSegment",
            Perturbation::RelocateSegment => "RelocateSegment",
            Perturbation::ShuffleSegment => "ShuffleSegment",
        }
    }

    /// Perturbs a segment of up to `segment_len` cities.
    ///
    /// The segment is shortened when the tour is too small for it. Returns
    /// `false` if the tour is too small for any change, in which case it is
    /// left untouched.
    pub fn apply<R>(&self, tour: &mut Tour, segment_len: usize, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        let n = tour.len();
        match self {
            Perturbation::ReverseSegment => {
                let len = segment_len.min(n);
                if len < 2 {
                    return false;
                }
                let start = rng.random_range(0..=n - len);
                tour.reverse(start, start + len - 1);
                true
            }
            Perturbation::RelocateSegment => {
                // At least two cities must stay outside the segment, otherwise
                // every insertion point restores the same cycle.
                let len = segment_len.min(n.saturating_sub(2));
                if len == 0 {
                    return false;
                }
                let start = rng.random_range(0..n);
                // Skip the city right before the segment, which is a no-op target.
                let offset = rng.random_range(0..n - len - 1);
                let after = tour.city_at((start + len + offset) % n);
                tour.relocate_segment(start, len, after, false);
                true
            }
            Perturbation::ShuffleSegment => {
                let len = segment_len.min(n);
                if len < 2 {
                    return false;
                }
                let start = rng.random_range(0..=n - len);
                // Sattolo's algorithm: a uniformly random cyclic permutation.
                for i in (1..len).rev() {
                    let j = rng.random_range(0..i);
                    tour.swap(start + i, start + j);
                }
                true
            }
        }
    }
}

impl std::fmt::Display for Perturbation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn is_permutation(tour: &Tour) -> bool {
        let mut ids = tour.to_ids();
        ids.sort_unstable();
        ids == (1..=tour.len()).collect::<Vec<_>>()
    }

    #[test]
    fn test_every_perturbation_changes_the_sequence() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [4usize, 5, 9, 20] {
            for perturbation in Perturbation::ALL {
                for len in 2..=8 {
                    let mut tour = Tour::identity(n);
                    assert!(perturbation.apply(&mut tour, len, &mut rng));
                    assert!(is_permutation(&tour));
                    assert_ne!(tour, Tour::identity(n), "{} with len {} on {}", perturbation, len, n);
                }
            }
        }
    }

    #[test]
    fn test_relocation_changes_the_cycle() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let mut tour = Tour::identity(7);
            Perturbation::RelocateSegment.apply(&mut tour, 3, &mut rng);
            assert!(!tour.is_same_cycle(&Tour::identity(7)), "got {}", tour);
        }
    }

    #[test]
    fn test_too_small_tours_are_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut tour = Tour::identity(2);
        assert!(!Perturbation::RelocateSegment.apply(&mut tour, 4, &mut rng));
        assert!(!Perturbation::ReverseSegment.apply(&mut tour, 1, &mut rng));
        assert!(!Perturbation::ShuffleSegment.apply(&mut tour, 1, &mut rng));
        assert_eq!(tour, Tour::identity(2));
    }

    #[test]
    fn test_random_picks_each_kind() {
        let mut rng = StdRng::seed_from_u64(9);
        let picked: std::collections::HashSet<_> =
            (0..200).map(|_| Perturbation::random(&mut rng)).collect();
        assert_eq!(picked.len(), 3);
    }
}
