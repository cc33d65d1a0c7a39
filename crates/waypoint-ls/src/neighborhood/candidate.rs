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

//! Neighborhoods backed by a shared candidate list.
//!
//! `CandidateNeighborhoods` is the neighborhood the engine uses in practice:
//! the neighbors of a city are exactly its candidate block. Blocks are sorted,
//! so membership is a binary search over `m` entries rather than the linear
//! scan a general adjacency list would need.

use crate::neighborhood::neighborhoods::Neighborhoods;
use std::sync::Arc;
use waypoint_model::{candidates::CandidateList, index::CityId};

/// Neighborhoods given by the blocks of a `CandidateList`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateNeighborhoods {
    candidates: Arc<CandidateList>,
}

impl CandidateNeighborhoods {
    #[inline]
    pub fn new(candidates: Arc<CandidateList>) -> Self {
        Self { candidates }
    }

    #[inline]
    pub fn candidates(&self) -> &Arc<CandidateList> {
        &self.candidates
    }
}

impl From<Arc<CandidateList>> for CandidateNeighborhoods {
    fn from(candidates: Arc<CandidateList>) -> Self {
        Self::new(candidates)
    }
}

impl From<CandidateList> for CandidateNeighborhoods {
    fn from(candidates: CandidateList) -> Self {
        Self::new(Arc::new(candidates))
    }
}

impl Neighborhoods for CandidateNeighborhoods {
    #[inline]
    fn num_cities(&self) -> usize {
        self.candidates.num_cities()
    }

    #[inline(always)]
    unsafe fn are_neighbors_unchecked(&self, a: CityId, b: CityId) -> bool {
        self.candidates.contains(a, b)
    }

    #[inline(always)]
    unsafe fn neighbors_of_unchecked(&self, city: CityId) -> &[CityId] {
        self.candidates.block(city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_are_candidate_blocks() {
        let list = CandidateList::from_blocks(2, [[4, 2], [1, 3], [2, 4], [3, 1]]).unwrap();
        let nh = CandidateNeighborhoods::from(list);
        assert_eq!(nh.num_cities(), 4);

        let n1: Vec<usize> = nh.neighbors_of(CityId::new(1)).iter().map(|c| c.get()).collect();
        assert_eq!(n1, vec![2, 4]);
        assert!(nh.are_neighbors(CityId::new(1), CityId::new(4)));
        assert!(!nh.are_neighbors(CityId::new(1), CityId::new(3)));
    }

    #[test]
    fn test_shares_the_list() {
        let list = Arc::new(CandidateList::from_blocks(1, [[2], [1]]).unwrap());
        let nh = CandidateNeighborhoods::new(Arc::clone(&list));
        assert!(Arc::ptr_eq(nh.candidates(), &list));
    }
}
