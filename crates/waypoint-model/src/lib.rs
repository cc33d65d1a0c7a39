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

//! # Waypoint Model
//!
//! Domain model for symmetric and asymmetric traveling salesman instances.
//!
//! ## Modules
//!
//! - `index`: The one-based `CityId`.
//! - `tour`: `Tour`, a validated closed permutation with an inverse position
//!   index, plus the in-place mutations local search applies (segment
//!   reversal, exchange, segment relocation).
//! - `cost`: The `DistanceOracle` boundary and the bundled oracles
//!   (`EuclideanDistance`, `RoundedEuclideanDistance`, `DistanceMatrix`).
//! - `candidates`: `CandidateList`, fixed-stride sorted candidate blocks
//!   with binary-searched slot lookup and a k-nearest builder.
//! - `loading`: `InstanceLoader` for TSPLIB coordinate files and plain
//!   coordinate lists.

pub mod candidates;
pub mod cost;
pub mod index;
pub mod loading;
pub mod tour;
