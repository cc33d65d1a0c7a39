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

//! Waypoint-LS: candidate-restricted multi-neighborhood local search
//!
//! Improves a TSP tour in place until no configured neighborhood operator
//! can shorten it, scanning only moves that connect a pivot city to one of
//! its candidate neighbors. Edge-keyed auxiliary data lives in a sparse store
//! of `n * m` slots instead of a dense `n * n` matrix.
//!
//! Core flow
//! - Build a `waypoint_model::candidates::CandidateList` and wrap it in
//!   `neighborhood::candidate::CandidateNeighborhoods`.
//! - Pick a `waypoint_model::cost::DistanceOracle`.
//! - Configure a `config::SearchConfig` (policy, operators, threshold).
//! - Run `engine::MultiNeighborhoodSearchEngine::run` with a monitor, or
//!   `optimize` without one.
//! - For evolutionary algorithms, use `mutation::LocalSearchMutation`, which
//!   perturbs and re-optimizes until the child differs from its parent.
//!
//! Assumptions and guarantees
//! - The tour stays a permutation after every applied move.
//! - Only moves shortening the tour by more than the improvement threshold
//!   are applied, so the tour length never increases.
//! - 2-opt and reversed Or-move deltas assume symmetric costs.
//!
//! Module map
//! - `edge`: `CandidateEdgeStore`, numeric attributes keyed by candidate edges.
//! - `neighborhood`: full and candidate-restricted neighborhoods.
//! - `operator`: moves and the neighborhood operators that enumerate them.
//! - `engine`: the descent driver.
//! - `config`: search and mutation settings with validating builders.
//! - `monitor`: run observers (log, time limit, move limit, composite).
//! - `result`: outcomes with termination reasons.
//! - `stats`: lightweight counters and timing.
//! - `perturbation`: random segment perturbations.
//! - `mutation`: the local search mutation operator.

pub mod config;
pub mod edge;
pub mod engine;
pub mod monitor;
pub mod mutation;
pub mod neighborhood;
pub mod operator;
pub mod perturbation;
pub mod result;
pub mod stats;
