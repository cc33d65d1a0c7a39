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

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::hint::black_box;
use std::sync::Arc;
use waypoint_ls::config::{ImprovementSelectionPolicy, SearchConfig};
use waypoint_ls::edge::candidate_edge::SymmetricCandidateEdges;
use waypoint_ls::engine::MultiNeighborhoodSearchEngine;
use waypoint_ls::mutation::LocalSearchMutation;
use waypoint_ls::neighborhood::candidate::CandidateNeighborhoods;
use waypoint_model::candidates::CandidateList;
use waypoint_model::cost::{Coordinates, RoundedEuclideanDistance};
use waypoint_model::index::CityId;
use waypoint_model::tour::Tour;

const SIZES: [usize; 3] = [100, 500, 1000];
const CANDIDATES_PER_CITY: usize = 8;

fn random_instance(n: usize, seed: u64) -> (RoundedEuclideanDistance, Arc<CandidateList>, Tour) {
    let mut rng = StdRng::seed_from_u64(seed);
    let points = (0..n)
        .map(|_| (rng.random_range(0.0..10_000.0), rng.random_range(0.0..10_000.0)))
        .collect();
    let oracle = RoundedEuclideanDistance::new(Coordinates::new(points));
    let candidates = Arc::new(
        CandidateList::nearest(&oracle, CANDIDATES_PER_CITY).expect("Failed to build candidate lists"),
    );
    let mut ids: Vec<usize> = (1..=n).collect();
    ids.shuffle(&mut rng);
    let tour = Tour::new(ids).expect("Shuffled ids must form a tour");
    (oracle, candidates, tour)
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_benchmark");
    group.sample_size(10);

    for n in SIZES {
        let (oracle, candidates, start) = random_instance(n, 42);
        let neighborhoods = CandidateNeighborhoods::from(candidates);
        group.throughput(Throughput::Elements(n as u64));

        for policy in [
            ImprovementSelectionPolicy::FirstImprovement,
            ImprovementSelectionPolicy::BestImprovement,
        ] {
            let engine = MultiNeighborhoodSearchEngine::new(
                SearchConfig::builder()
                    .with_policy(policy)
                    .build()
                    .expect("Default operators are valid"),
            );
            group.bench_with_input(BenchmarkId::new(policy.to_string(), n), &n, |b, _| {
                b.iter_batched(
                    || start.clone(),
                    |mut tour| {
                        let outcome = engine.optimize(&mut tour, &oracle, &neighborhoods);
                        black_box(outcome.final_length())
                    },
                    criterion::BatchSize::LargeInput,
                )
            });
        }
    }

    group.finish();
}

fn bench_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation_benchmark");
    group.sample_size(10);

    for n in SIZES {
        let (oracle, candidates, mut parent) = random_instance(n, 7);
        let neighborhoods = CandidateNeighborhoods::from(candidates);
        let mutation = LocalSearchMutation::<i64>::default();
        mutation.engine().optimize(&mut parent, &oracle, &neighborhoods);
        let mut rng = StdRng::seed_from_u64(1);

        group.bench_with_input(BenchmarkId::new("mutate", n), &n, |b, _| {
            b.iter(|| black_box(mutation.mutate(&parent, &oracle, &neighborhoods, &mut rng)))
        });
    }

    group.finish();
}

fn bench_edge_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_store_benchmark");

    for n in SIZES {
        let (_, candidates, tour) = random_instance(n, 3);
        let mut store = SymmetricCandidateEdges::<i32>::new(candidates);
        let edges: Vec<(CityId, CityId)> = (0..n)
            .map(|pos| (tour.city_at(pos), tour.city_at((pos + 1) % n)))
            .collect();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("inc_tour_edges", n), &n, |b, _| {
            b.iter(|| {
                for &(a, z) in &edges {
                    store.inc(black_box(a), black_box(z));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_engine, bench_mutation, bench_edge_store);
criterion_main!(benches);
