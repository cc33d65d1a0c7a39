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

//! Fixed-stride candidate neighbor lists.
//!
//! Every city owns a block of exactly `m` candidate neighbors. All blocks live
//! in one flat arena of `n * m` ids; the block of city `a` starts at
//! `(a - 1) * m`. Blocks are sorted in strictly ascending id order so that
//! membership and slot lookup are a binary search over `m` entries, and no
//! block contains its own city.
//!
//! The arena offsets double as slot indices for any parallel attribute array
//! of length `n * m`, which is how candidate edge stores address their data.
//! The list is immutable after construction and is meant to be shared
//! read-only (typically behind an `Arc`) by every consumer of a search run.

use crate::{cost::DistanceOracle, index::CityId};
use waypoint_core::num::value::CostNumeric;

/// The error type for candidate list construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateListError {
    /// `n` must be positive and `m` must satisfy `0 < m < n`.
    InvalidDimensions { num_cities: usize, per_city: usize },
    /// A block does not hold exactly `m` candidates.
    WrongBlockSize { city: usize, expected: usize, actual: usize },
    /// A candidate id lies outside `1..=n`.
    CityOutOfRange { city: usize, candidate: usize },
    /// A block lists its own city.
    SelfCandidate { city: usize },
    /// A block lists the same candidate twice.
    DuplicateCandidate { city: usize, candidate: usize },
}

impl std::fmt::Display for CandidateListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimensions {
                num_cities,
                per_city,
            } => write!(
                f,
                "Invalid candidate list dimensions: {} candidates per city for {} cities",
                per_city, num_cities
            ),
            Self::WrongBlockSize {
                city,
                expected,
                actual,
            } => write!(
                f,
                "City {} has {} candidates but every city needs exactly {}",
                city, actual, expected
            ),
            Self::CityOutOfRange { city, candidate } => {
                write!(f, "City {} lists candidate {} which does not exist", city, candidate)
            }
            Self::SelfCandidate { city } => write!(f, "City {} lists itself as a candidate", city),
            Self::DuplicateCandidate { city, candidate } => {
                write!(f, "City {} lists candidate {} more than once", city, candidate)
            }
        }
    }
}

impl std::error::Error for CandidateListError {}

/// Sorted, fixed-size candidate neighbor blocks for cities `1..=n`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateList {
    num_cities: usize,
    per_city: usize,
    // Block of city `a` is `candidates[(a - 1) * per_city..a * per_city]`.
    candidates: Vec<CityId>,
}

impl CandidateList {
    /// Builds a list from one block of raw one-based ids per city, city 1 first.
    ///
    /// Blocks may be given in any order; they are sorted here.
    pub fn from_blocks<B>(per_city: usize, blocks: B) -> Result<Self, CandidateListError>
    where
        B: IntoIterator,
        B::Item: AsRef<[usize]>,
    {
        let blocks: Vec<B::Item> = blocks.into_iter().collect();
        let num_cities = blocks.len();
        if num_cities == 0 || per_city == 0 || per_city >= num_cities {
            return Err(CandidateListError::InvalidDimensions {
                num_cities,
                per_city,
            });
        }

        let mut candidates = Vec::with_capacity(num_cities * per_city);
        for (slot, block) in blocks.iter().enumerate() {
            let city = slot + 1;
            let block = block.as_ref();
            if block.len() != per_city {
                return Err(CandidateListError::WrongBlockSize {
                    city,
                    expected: per_city,
                    actual: block.len(),
                });
            }

            let mut sorted = block.to_vec();
            sorted.sort_unstable();
            for (k, &candidate) in sorted.iter().enumerate() {
                if candidate == 0 || candidate > num_cities {
                    return Err(CandidateListError::CityOutOfRange { city, candidate });
                }
                if candidate == city {
                    return Err(CandidateListError::SelfCandidate { city });
                }
                if k > 0 && sorted[k - 1] == candidate {
                    return Err(CandidateListError::DuplicateCandidate { city, candidate });
                }
            }
            candidates.extend(sorted.into_iter().map(CityId::new));
        }

        Ok(Self {
            num_cities,
            per_city,
            candidates,
        })
    }

    /// Builds the `per_city` nearest neighbors of every city under `oracle`.
    ///
    /// Distances are measured from the city to the candidate. Ties are broken
    /// by the lower id. Runs in `O(n^2 log n)`.
    pub fn nearest<T, D>(oracle: &D, per_city: usize) -> Result<Self, CandidateListError>
    where
        T: CostNumeric,
        D: DistanceOracle<T> + ?Sized,
    {
        let n = oracle.num_cities();
        if n == 0 || per_city == 0 || per_city >= n {
            return Err(CandidateListError::InvalidDimensions {
                num_cities: n,
                per_city,
            });
        }

        let mut others: Vec<(T, usize)> = Vec::with_capacity(n - 1);
        let mut blocks: Vec<Vec<usize>> = Vec::with_capacity(n);
        for a in 0..n {
            let from = CityId::from_slot(a);
            others.clear();
            others.extend(
                (0..n)
                    .filter(|&b| b != a)
                    .map(|b| (oracle.distance(from, CityId::from_slot(b)), b + 1)),
            );
            others.sort_by(|x, y| {
                x.0.partial_cmp(&y.0)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(x.1.cmp(&y.1))
            });
            blocks.push(others.iter().take(per_city).map(|&(_, id)| id).collect());
        }

        Self::from_blocks(per_city, blocks)
    }

    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Returns the fixed block size `m`.
    #[inline]
    pub fn candidates_per_city(&self) -> usize {
        self.per_city
    }

    /// Returns the total number of slots, `n * m`.
    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the first arena slot of `city`'s block.
    #[inline]
    pub fn block_start(&self, city: CityId) -> usize {
        let slot = city.slot();
        assert!(
            slot < self.num_cities,
            "called `CandidateList::block_start` with city out of bounds: the len is {} but the index is {}",
            self.num_cities,
            city.get()
        );
        slot * self.per_city
    }

    /// Returns the sorted candidate block of `city`.
    #[inline]
    pub fn block(&self, city: CityId) -> &[CityId] {
        let start = self.block_start(city);
        &self.candidates[start..start + self.per_city]
    }

    /// Returns the arena slot holding `b` inside `a`'s block, if `b` is a candidate of `a`.
    #[inline]
    pub fn slot_of(&self, a: CityId, b: CityId) -> Option<usize> {
        let start = self.block_start(a);
        self.candidates[start..start + self.per_city]
            .binary_search(&b)
            .ok()
            .map(|offset| start + offset)
    }

    /// Returns `true` if `b` is a candidate of `a`.
    #[inline]
    pub fn contains(&self, a: CityId, b: CityId) -> bool {
        self.slot_of(a, b).is_some()
    }

    /// Returns the candidate stored at arena slot `slot`.
    #[inline]
    pub fn candidate_at(&self, slot: usize) -> CityId {
        self.candidates[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{Coordinates, EuclideanDistance};

    fn city(id: usize) -> CityId {
        CityId::new(id)
    }

    fn ids(list: &CandidateList, a: usize) -> Vec<usize> {
        list.block(city(a)).iter().map(|c| c.get()).collect()
    }

    #[test]
    fn test_from_blocks_sorts_each_block() {
        let list = CandidateList::from_blocks(2, [[3, 2], [3, 1], [2, 1]]).unwrap();
        assert_eq!(list.num_cities(), 3);
        assert_eq!(list.candidates_per_city(), 2);
        assert_eq!(list.len(), 6);
        assert_eq!(ids(&list, 1), vec![2, 3]);
        assert_eq!(ids(&list, 3), vec![1, 2]);
    }

    #[test]
    fn test_slot_of_uses_block_offsets() {
        let list = CandidateList::from_blocks(2, [[2, 3], [1, 3], [1, 2]]).unwrap();
        assert_eq!(list.slot_of(city(1), city(3)), Some(1));
        assert_eq!(list.slot_of(city(2), city(1)), Some(2));
        assert_eq!(list.slot_of(city(3), city(2)), Some(5));
        assert_eq!(list.slot_of(city(1), city(1)), None);
        assert_eq!(list.candidate_at(5), city(2));
        assert!(list.contains(city(2), city(3)));
    }

    #[test]
    fn test_from_blocks_rejects_invalid_input() {
        assert!(matches!(
            CandidateList::from_blocks(0, [[0usize; 0]; 2]),
            Err(CandidateListError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            CandidateList::from_blocks(3, [[2, 3, 1], [1, 3, 2], [1, 2, 3]]),
            Err(CandidateListError::InvalidDimensions { .. })
        ));
        assert_eq!(
            CandidateList::from_blocks(2, vec![vec![2, 3], vec![1], vec![1, 2]]),
            Err(CandidateListError::WrongBlockSize {
                city: 2,
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            CandidateList::from_blocks(1, [[2], [4], [1]]),
            Err(CandidateListError::CityOutOfRange {
                city: 2,
                candidate: 4
            })
        );
        assert_eq!(
            CandidateList::from_blocks(1, [[1], [1], [1]]),
            Err(CandidateListError::SelfCandidate { city: 1 })
        );
        assert_eq!(
            CandidateList::from_blocks(2, [[2, 3], [3, 3], [1, 2]]),
            Err(CandidateListError::DuplicateCandidate {
                city: 2,
                candidate: 3
            })
        );
    }

    #[test]
    fn test_nearest_on_a_line() {
        let points = (0..6).map(|i| (i as f64, 0.0)).collect();
        let oracle = EuclideanDistance::new(Coordinates::new(points));
        let list = CandidateList::nearest(&oracle, 2).unwrap();

        assert_eq!(ids(&list, 1), vec![2, 3]);
        assert_eq!(ids(&list, 3), vec![2, 4]);
        // the last city only has neighbors to its left
        assert_eq!(ids(&list, 6), vec![4, 5]);
    }

    #[test]
    fn test_nearest_breaks_ties_by_id() {
        // city 1 in the middle, cities 2..=5 at distance 1 around it
        let points = vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];
        let oracle = EuclideanDistance::new(Coordinates::new(points));
        let list = CandidateList::nearest(&oracle, 2).unwrap();
        assert_eq!(ids(&list, 1), vec![2, 3]);
    }

    #[test]
    fn test_nearest_rejects_too_many_candidates() {
        let oracle = EuclideanDistance::new(Coordinates::new(vec![(0.0, 0.0), (1.0, 0.0)]));
        assert!(CandidateList::nearest(&oracle, 2).is_err());
    }

    #[test]
    #[should_panic(expected = "called `CandidateList::block_start` with city out of bounds")]
    fn test_block_out_of_bounds_panics() {
        let list = CandidateList::from_blocks(1, [[2], [1]]).unwrap();
        let _ = list.block(city(3));
    }
}
