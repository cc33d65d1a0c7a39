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

//! Sparse edge attributes keyed by candidate edges.
//!
//! A `CandidateEdgeStore` attaches one numeric value to every candidate edge
//! of a `CandidateList`: visit counts, tabu flags, learned weights and the
//! like. Storage is a single array parallel to the candidate arena, so the
//! store costs `n * m` values instead of the `n * n` a dense matrix would
//! need, and every access is one or two binary searches over `m` entries.
//!
//! Pairs that are not candidate edges have no slot. Reading them yields zero
//! and writing them does nothing. With strict slots enabled, debug builds
//! assert instead, which helps catch callers that expect a dense store.
//!
//! The store is generic over the element width (`i8`, `i16`, `i32`, `i64`,
//! `f32`, `f64`) and over the symmetry policy. A symmetric store resolves the
//! pair `(a, b)` in `a`'s block and the mirrored pair in `b`'s block and
//! writes every resolved slot, so the edge is visible from both ends even when
//! only one city lists the other. Integer arithmetic wraps on overflow.

use num_traits::AsPrimitive;
use std::{marker::PhantomData, sync::Arc};
use waypoint_core::num::value::EdgeValue;
use waypoint_model::{candidates::CandidateList, index::CityId};

/// Symmetry policy of a candidate edge store.
pub trait EdgeSymmetry:
    Clone + Copy + Default + PartialEq + Eq + std::fmt::Debug + Send + Sync + 'static
{
    /// `true` if `(a, b)` and `(b, a)` address the same attribute.
    const SYMMETRIC: bool;
}

/// `(a, b)` and `(b, a)` are the same edge.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Symmetric;

/// `(a, b)` and `(b, a)` are different edges.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Asymmetric;

impl EdgeSymmetry for Symmetric {
    const SYMMETRIC: bool = true;
}

impl EdgeSymmetry for Asymmetric {
    const SYMMETRIC: bool = false;
}

/// A numeric attribute per candidate edge.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEdgeStore<V, S> {
    candidates: Arc<CandidateList>,
    data: Vec<V>,
    strict_slots: bool,
    _symmetry: PhantomData<S>,
}

/// A store where `(a, b)` and `(b, a)` share their attribute.
pub type SymmetricCandidateEdges<V> = CandidateEdgeStore<V, Symmetric>;

/// A store where `(a, b)` and `(b, a)` are independent.
pub type AsymmetricCandidateEdges<V> = CandidateEdgeStore<V, Asymmetric>;

/// Slots resolved for one pair: the direct slot and, for symmetric stores, the mirrored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Resolved {
    direct: Option<usize>,
    mirrored: Option<usize>,
}

impl Resolved {
    #[inline(always)]
    fn any(&self) -> bool {
        self.direct.is_some() || self.mirrored.is_some()
    }

    #[inline(always)]
    fn slots(self) -> impl Iterator<Item = usize> {
        self.direct.into_iter().chain(self.mirrored)
    }
}

impl<V, S> CandidateEdgeStore<V, S>
where
    V: EdgeValue,
    S: EdgeSymmetry,
{
    /// `true` if the store identifies `(a, b)` with `(b, a)`.
    pub const SYMMETRIC: bool = S::SYMMETRIC;

    /// `true` if the element width is a floating point type.
    pub const FLOATS_ALLOWED: bool = V::FLOATS_ALLOWED;

    /// Creates a zeroed store over `candidates`.
    pub fn new(candidates: Arc<CandidateList>) -> Self {
        let data = vec![V::ZERO; candidates.len()];
        Self {
            candidates,
            data,
            strict_slots: false,
            _symmetry: PhantomData,
        }
    }

    /// Enables a debug assertion on accesses that resolve no slot.
    #[inline]
    pub fn with_strict_slots(mut self, yes: bool) -> Self {
        self.strict_slots = yes;
        self
    }

    #[inline]
    pub fn candidates(&self) -> &Arc<CandidateList> {
        &self.candidates
    }

    /// Returns the number of slots, `n * m`. Never changes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn is_symmetric(&self) -> bool {
        S::SYMMETRIC
    }

    #[inline]
    pub fn are_floats_allowed(&self) -> bool {
        V::FLOATS_ALLOWED
    }

    #[inline]
    pub fn minimum_allowed_value(&self) -> i64 {
        V::MIN_ALLOWED
    }

    #[inline]
    pub fn maximum_allowed_value(&self) -> i64 {
        V::MAX_ALLOWED
    }

    #[inline(always)]
    fn resolve(&self, method: &'static str, a: CityId, b: CityId) -> Resolved {
        let direct = self.candidates.slot_of(a, b);
        let mirrored = if S::SYMMETRIC {
            self.candidates.slot_of(b, a)
        } else {
            None
        };
        let resolved = Resolved { direct, mirrored };

        debug_assert!(
            !self.strict_slots || resolved.any(),
            "called `CandidateEdgeStore::{}` with a non-candidate edge: ({}, {}) has no slot",
            method,
            a,
            b
        );

        resolved
    }

    /// Returns the attribute of `(a, b)`, or zero if the pair has no slot.
    #[inline]
    pub fn get(&self, a: CityId, b: CityId) -> V {
        let resolved = self.resolve("get", a, b);
        resolved
            .direct
            .or(resolved.mirrored)
            .map_or(V::ZERO, |slot| self.data[slot])
    }

    /// Returns the attribute of `(a, b)` widened to `i64`.
    #[inline]
    pub fn get_i64(&self, a: CityId, b: CityId) -> i64 {
        <V as AsPrimitive<i64>>::as_(self.get(a, b))
    }

    /// Returns the attribute of `(a, b)` converted to `f64`.
    #[inline]
    pub fn get_f64(&self, a: CityId, b: CityId) -> f64 {
        <V as AsPrimitive<f64>>::as_(self.get(a, b))
    }

    /// Writes `value` to every slot of `(a, b)`.
    #[inline]
    pub fn set(&mut self, a: CityId, b: CityId, value: V) {
        for slot in self.resolve("set", a, b).slots() {
            self.data[slot] = value;
        }
    }

    /// Writes `value`, narrowed to the store width, to every slot of `(a, b)`.
    #[inline]
    pub fn set_i64(&mut self, a: CityId, b: CityId, value: i64) {
        self.set(a, b, V::from_i64_truncating(value));
    }

    /// Writes `value`, narrowed to the store width, to every slot of `(a, b)`.
    #[inline]
    pub fn set_f64(&mut self, a: CityId, b: CityId, value: f64) {
        self.set(a, b, V::from_f64_truncating(value));
    }

    /// Adds `value` to every slot of `(a, b)`, wrapping on integer overflow.
    #[inline]
    pub fn add(&mut self, a: CityId, b: CityId, value: V) {
        for slot in self.resolve("add", a, b).slots() {
            self.data[slot] = self.data[slot].wrapping_add_val(value);
        }
    }

    /// Adds `value`, narrowed to the store width, to every slot of `(a, b)`.
    #[inline]
    pub fn add_i64(&mut self, a: CityId, b: CityId, value: i64) {
        self.add(a, b, V::from_i64_truncating(value));
    }

    /// Adds `value`, narrowed to the store width, to every slot of `(a, b)`.
    #[inline]
    pub fn add_f64(&mut self, a: CityId, b: CityId, value: f64) {
        self.add(a, b, V::from_f64_truncating(value));
    }

    /// Same as `add(a, b, 1)`.
    #[inline]
    pub fn inc(&mut self, a: CityId, b: CityId) {
        self.add(a, b, V::PLUS_ONE);
    }

    /// Same as `add(a, b, -1)`.
    #[inline]
    pub fn dec(&mut self, a: CityId, b: CityId) {
        self.add(a, b, V::MINUS_ONE);
    }

    /// Resets every slot to zero.
    #[inline]
    pub fn clear(&mut self) {
        self.data.fill(V::ZERO);
    }

    /// Returns the number of slots holding a non-zero value.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != V::ZERO).count()
    }

    /// Iterates over `(a, b, value)` for every slot, city 1's block first.
    ///
    /// A symmetric edge listed by both endpoints is reported twice, once per slot.
    pub fn iter(&self) -> impl Iterator<Item = (CityId, CityId, V)> + '_ {
        let per_city = self.candidates.candidates_per_city();
        self.data.iter().enumerate().map(move |(slot, &value)| {
            (
                CityId::from_slot(slot / per_city),
                self.candidates.candidate_at(slot),
                value,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(id: usize) -> CityId {
        CityId::new(id)
    }

    // 13 cities on a ring, each listing the cities one and three steps away.
    fn ring_candidates() -> Arc<CandidateList> {
        let n = 13usize;
        let blocks: Vec<Vec<usize>> = (1..=n)
            .map(|a| {
                [n - 3, n - 1, 1, 3]
                    .iter()
                    .map(|&k| (a - 1 + k) % n + 1)
                    .collect()
            })
            .collect();
        Arc::new(CandidateList::from_blocks(4, blocks).unwrap())
    }

    // 5 cities, 1 candidate each, only city 1 lists city 2.
    fn one_sided_candidates() -> Arc<CandidateList> {
        Arc::new(CandidateList::from_blocks(1, [[2], [3], [4], [5], [1]]).unwrap())
    }

    #[test]
    fn test_symmetric_byte_store_scenario() {
        let mut store = SymmetricCandidateEdges::<i8>::new(ring_candidates());
        store.set(city(2), city(5), -3);
        assert_eq!(store.get(city(2), city(5)), -3);
        assert_eq!(store.get(city(5), city(2)), -3);

        // 9 is not a candidate of 2 and 2 is not a candidate of 9
        store.set(city(2), city(9), 10);
        assert_eq!(store.get(city(2), city(9)), 0);
        assert_eq!(store.get(city(9), city(2)), 0);
        assert_eq!(store.count_nonzero(), 2);
        assert_eq!(store.len(), 13 * 4);
    }

    #[test]
    fn test_asymmetric_store_keeps_directions_apart() {
        let mut store = AsymmetricCandidateEdges::<i16>::new(ring_candidates());
        store.set(city(3), city(6), 7);
        assert_eq!(store.get(city(3), city(6)), 7);
        assert_eq!(store.get(city(6), city(3)), 0);
        store.set(city(6), city(3), -2);
        assert_eq!(store.get(city(3), city(6)), 7);
        assert_eq!(store.get(city(6), city(3)), -2);
    }

    #[test]
    fn test_symmetric_store_resolves_one_sided_candidates() {
        let mut store = SymmetricCandidateEdges::<i32>::new(one_sided_candidates());
        store.set(city(2), city(1), 42);
        assert_eq!(store.get(city(1), city(2)), 42);
        assert_eq!(store.get(city(2), city(1)), 42);
        assert_eq!(store.count_nonzero(), 1);

        let mut asym = AsymmetricCandidateEdges::<i32>::new(one_sided_candidates());
        asym.set(city(2), city(1), 42);
        assert_eq!(asym.get(city(2), city(1)), 0);
        assert_eq!(asym.count_nonzero(), 0);
    }

    #[test]
    fn test_symmetric_store_reads_direct_slot_first() {
        let mut store = SymmetricCandidateEdges::<i64>::new(ring_candidates());
        store.set(city(1), city(2), 5);
        store.add(city(1), city(2), 1);
        assert_eq!(store.get(city(1), city(2)), 6);
        assert_eq!(store.get(city(2), city(1)), 6);
    }

    #[test]
    fn test_round_trip_for_every_width() {
        fn round_trip<V: EdgeValue>(value: V) {
            let mut store = SymmetricCandidateEdges::<V>::new(ring_candidates());
            store.set(city(7), city(8), value);
            assert_eq!(store.get(city(7), city(8)), value);
            assert_eq!(store.get(city(8), city(7)), value);
        }
        round_trip::<i8>(-128);
        round_trip::<i16>(12_345);
        round_trip::<i32>(-7);
        round_trip::<i64>(i64::MAX);
        round_trip::<f32>(0.5);
        round_trip::<f64>(-1.25);
    }

    #[test]
    fn test_inc_and_dec_match_add() {
        let mut a = SymmetricCandidateEdges::<i16>::new(ring_candidates());
        let mut b = SymmetricCandidateEdges::<i16>::new(ring_candidates());
        a.inc(city(4), city(5));
        a.inc(city(4), city(5));
        a.dec(city(6), city(7));
        b.add(city(4), city(5), 2);
        b.add(city(6), city(7), -1);
        assert_eq!(a, b);
        assert_eq!(a.get(city(5), city(4)), 2);
        assert_eq!(a.get(city(7), city(6)), -1);
    }

    #[test]
    fn test_narrow_width_wraps() {
        let mut store = AsymmetricCandidateEdges::<i8>::new(ring_candidates());
        store.set(city(1), city(2), i8::MAX);
        store.inc(city(1), city(2));
        assert_eq!(store.get(city(1), city(2)), i8::MIN);
        store.set_i64(city(1), city(4), 300);
        assert_eq!(store.get(city(1), city(4)), 44);
    }

    #[test]
    fn test_widening_and_narrowing_accessors() {
        let mut store = SymmetricCandidateEdges::<f32>::new(ring_candidates());
        store.set_f64(city(10), city(11), 2.5);
        store.add_i64(city(10), city(11), 1);
        assert_eq!(store.get_f64(city(11), city(10)), 3.5);
        assert_eq!(store.get_i64(city(11), city(10)), 3);

        let mut ints = SymmetricCandidateEdges::<i32>::new(ring_candidates());
        ints.set_f64(city(10), city(11), -2.9);
        ints.add_f64(city(10), city(11), 0.7);
        assert_eq!(ints.get(city(10), city(11)), -2);
    }

    #[test]
    fn test_non_candidate_writes_are_no_ops() {
        let mut store = SymmetricCandidateEdges::<i32>::new(ring_candidates());
        let before = store.clone();
        store.set(city(1), city(7), 9);
        store.add(city(1), city(7), 9);
        store.inc(city(1), city(7));
        store.dec(city(1), city(7));
        store.set(city(3), city(3), 1);
        assert_eq!(store, before);
        assert_eq!(store.len(), before.len());
        assert_eq!(store.get(city(1), city(7)), 0);
    }

    #[test]
    fn test_clear_zeroes_everything() {
        let mut store = SymmetricCandidateEdges::<f64>::new(ring_candidates());
        store.set(city(1), city(2), 1.0);
        store.set(city(5), city(6), 2.0);
        assert_eq!(store.count_nonzero(), 4);
        store.clear();
        assert_eq!(store.count_nonzero(), 0);
        assert_eq!(store.len(), 52);
    }

    #[test]
    fn test_introspection() {
        let bytes = SymmetricCandidateEdges::<i8>::new(ring_candidates());
        assert!(bytes.is_symmetric());
        assert!(!bytes.are_floats_allowed());
        assert_eq!(bytes.minimum_allowed_value(), -128);
        assert_eq!(bytes.maximum_allowed_value(), 127);

        let doubles = AsymmetricCandidateEdges::<f64>::new(ring_candidates());
        assert!(!doubles.is_symmetric());
        assert!(doubles.are_floats_allowed());
        assert!(AsymmetricCandidateEdges::<f32>::FLOATS_ALLOWED);
        assert!(!AsymmetricCandidateEdges::<i64>::SYMMETRIC);
    }

    #[test]
    fn test_iter_reports_every_slot() {
        let mut store = AsymmetricCandidateEdges::<i32>::new(one_sided_candidates());
        store.set(city(4), city(5), 3);
        let entries: Vec<(usize, usize, i32)> = store
            .iter()
            .map(|(a, b, v)| (a.get(), b.get(), v))
            .collect();
        assert_eq!(
            entries,
            vec![(1, 2, 0), (2, 3, 0), (3, 4, 0), (4, 5, 3), (5, 1, 0)]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "with a non-candidate edge")]
    fn test_strict_slots_assert_in_debug_builds() {
        let mut store = SymmetricCandidateEdges::<i8>::new(ring_candidates()).with_strict_slots(true);
        store.set(city(2), city(9), 1);
    }
}
