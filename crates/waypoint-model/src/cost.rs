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

//! Cost oracles for symmetric and asymmetric tour costs.
//!
//! The local search never looks at coordinates; it only asks a
//! `DistanceOracle` for the cost of traveling from one city to another. This
//! module ships the oracles needed by the loader, the tests and the
//! benchmarks: planar Euclidean distances (exact and TSPLIB-rounded), the
//! integer TSPLIB planar metrics selected by `EdgeWeightType`, and a dense
//! matrix for arbitrary, possibly asymmetric, costs.

use crate::index::CityId;
use waypoint_core::num::value::CostNumeric;

/// A deterministic cost function over ordered city pairs.
pub trait DistanceOracle<T>: Send + Sync
where
    T: CostNumeric,
{
    /// Returns the number of cities `n`; valid ids are `1..=n`.
    fn num_cities(&self) -> usize;

    /// Returns the cost of the edge from `a` to `b`.
    fn distance(&self, a: CityId, b: CityId) -> T;
}

impl<T, D> DistanceOracle<T> for &D
where
    T: CostNumeric,
    D: DistanceOracle<T> + ?Sized,
{
    #[inline]
    fn num_cities(&self) -> usize {
        (**self).num_cities()
    }

    #[inline]
    fn distance(&self, a: CityId, b: CityId) -> T {
        (**self).distance(a, b)
    }
}

/// Planar city coordinates indexed by city id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coordinates {
    points: Vec<(f64, f64)>,
}

impl Coordinates {
    /// Creates a coordinate set; the first point belongs to city 1.
    #[inline]
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn num_cities(&self) -> usize {
        self.points.len()
    }

    /// Returns the coordinates of `city`.
    #[inline]
    pub fn point(&self, city: CityId) -> (f64, f64) {
        let slot = city.slot();
        assert!(
            slot < self.points.len(),
            "called `Coordinates::point` with city out of bounds: the len is {} but the index is {}",
            self.points.len(),
            city.get()
        );
        self.points[slot]
    }

    /// Returns the Euclidean distance between two cities.
    #[inline]
    pub fn euclidean(&self, a: CityId, b: CityId) -> f64 {
        let (ax, ay) = self.point(a);
        let (bx, by) = self.point(b);
        (ax - bx).hypot(ay - by)
    }

    /// Returns the coordinates as a slice, city 1 first.
    #[inline]
    pub fn as_slice(&self) -> &[(f64, f64)] {
        &self.points
    }
}

/// Exact Euclidean distances.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EuclideanDistance {
    coordinates: Coordinates,
}

impl EuclideanDistance {
    #[inline]
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }

    #[inline]
    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }
}

impl From<Coordinates> for EuclideanDistance {
    fn from(coordinates: Coordinates) -> Self {
        Self::new(coordinates)
    }
}

impl DistanceOracle<f64> for EuclideanDistance {
    #[inline]
    fn num_cities(&self) -> usize {
        self.coordinates.num_cities()
    }

    #[inline]
    fn distance(&self, a: CityId, b: CityId) -> f64 {
        self.coordinates.euclidean(a, b)
    }
}

/// Euclidean distances rounded to the nearest integer, the TSPLIB `EUC_2D` metric.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoundedEuclideanDistance {
    coordinates: Coordinates,
}

impl RoundedEuclideanDistance {
    #[inline]
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }

    #[inline]
    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }
}

impl From<Coordinates> for RoundedEuclideanDistance {
    fn from(coordinates: Coordinates) -> Self {
        Self::new(coordinates)
    }
}

impl DistanceOracle<i64> for RoundedEuclideanDistance {
    #[inline]
    fn num_cities(&self) -> usize {
        self.coordinates.num_cities()
    }

    #[inline]
    fn distance(&self, a: CityId, b: CityId) -> i64 {
        // nint(x) = (int)(x + 0.5)
        (self.coordinates.euclidean(a, b) + 0.5) as i64
    }
}

/// The integer planar metrics of TSPLIB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeWeightType {
    /// Euclidean distance rounded to the nearest integer.
    #[default]
    Euc2d,
    /// Euclidean distance rounded up.
    Ceil2d,
    /// Pseudo-Euclidean distance of the `att48` and `att532` instances.
    Att,
}

impl EdgeWeightType {
    /// Returns the keyword used in a TSPLIB header.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Euc2d => "EUC_2D",
            Self::Ceil2d => "CEIL_2D",
            Self::Att => "ATT",
        }
    }

    /// Parses a TSPLIB header keyword; returns `None` for non-planar metrics.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "EUC_2D" => Some(Self::Euc2d),
            "CEIL_2D" => Some(Self::Ceil2d),
            "ATT" => Some(Self::Att),
            _ => None,
        }
    }

    /// Returns the integer cost of the offset `(dx, dy)` under this metric.
    #[inline]
    pub fn distance(&self, dx: f64, dy: f64) -> i64 {
        match self {
            Self::Euc2d => (dx.hypot(dy) + 0.5) as i64,
            Self::Ceil2d => dx.hypot(dy).ceil() as i64,
            Self::Att => {
                let r = ((dx * dx + dy * dy) / 10.0).sqrt();
                let t = (r + 0.5) as i64;
                if (t as f64) < r { t + 1 } else { t }
            }
        }
    }
}

impl std::fmt::Display for EdgeWeightType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer distances under a TSPLIB planar metric.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TsplibDistance {
    coordinates: Coordinates,
    edge_weight_type: EdgeWeightType,
}

impl TsplibDistance {
    #[inline]
    pub fn new(coordinates: Coordinates, edge_weight_type: EdgeWeightType) -> Self {
        Self {
            coordinates,
            edge_weight_type,
        }
    }

    #[inline]
    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    #[inline]
    pub fn edge_weight_type(&self) -> EdgeWeightType {
        self.edge_weight_type
    }
}

impl DistanceOracle<i64> for TsplibDistance {
    #[inline]
    fn num_cities(&self) -> usize {
        self.coordinates.num_cities()
    }

    #[inline]
    fn distance(&self, a: CityId, b: CityId) -> i64 {
        let (ax, ay) = self.coordinates.point(a);
        let (bx, by) = self.coordinates.point(b);
        self.edge_weight_type.distance(ax - bx, ay - by)
    }
}

/// A dense `n x n` cost matrix. Row `a`, column `b` holds the cost of `a -> b`.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<T> {
    num_cities: usize,
    costs: Vec<T>,
}

impl<T> DistanceMatrix<T>
where
    T: CostNumeric,
{
    /// Builds the matrix by evaluating `f` for every ordered pair, diagonal included.
    pub fn from_fn<F>(num_cities: usize, mut f: F) -> Self
    where
        F: FnMut(CityId, CityId) -> T,
    {
        let mut costs = Vec::with_capacity(num_cities * num_cities);
        for a in 0..num_cities {
            for b in 0..num_cities {
                costs.push(f(CityId::from_slot(a), CityId::from_slot(b)));
            }
        }
        Self { num_cities, costs }
    }

    /// Tabulates another oracle.
    pub fn from_oracle<D>(oracle: &D) -> Self
    where
        D: DistanceOracle<T>,
    {
        Self::from_fn(oracle.num_cities(), |a, b| oracle.distance(a, b))
    }

    /// Returns `true` if `d(a, b) == d(b, a)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        let n = self.num_cities;
        (0..n).all(|a| (a + 1..n).all(|b| self.costs[a * n + b] == self.costs[b * n + a]))
    }
}

impl<T> DistanceOracle<T> for DistanceMatrix<T>
where
    T: CostNumeric,
{
    #[inline]
    fn num_cities(&self) -> usize {
        self.num_cities
    }

    #[inline]
    fn distance(&self, a: CityId, b: CityId) -> T {
        let (ai, bi) = (a.slot(), b.slot());
        debug_assert!(
            ai < self.num_cities && bi < self.num_cities,
            "called `DistanceMatrix::distance` with city out of bounds: the len is {} but the indices are {} and {}",
            self.num_cities,
            a.get(),
            b.get()
        );
        self.costs[ai * self.num_cities + bi]
    }
}
