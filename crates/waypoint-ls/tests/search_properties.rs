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

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use waypoint_ls::{
    config::{ImprovementSelectionPolicy, SearchConfig},
    engine::MultiNeighborhoodSearchEngine,
    monitor::log::LogMonitor,
    mutation::LocalSearchMutation,
    neighborhood::candidate::CandidateNeighborhoods,
};
use waypoint_model::{
    candidates::CandidateList,
    cost::{Coordinates, RoundedEuclideanDistance},
    tour::Tour,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Instance {
    oracle: RoundedEuclideanDistance,
    neighborhoods: CandidateNeighborhoods,
    tour: Tour,
}

fn random_instance(seed: u64, n: usize, m: usize) -> Instance {
    let mut rng = StdRng::seed_from_u64(seed);
    let points = (0..n)
        .map(|_| (rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)))
        .collect();
    let oracle = RoundedEuclideanDistance::new(Coordinates::new(points));
    let neighborhoods = CandidateNeighborhoods::from(
        CandidateList::nearest(&oracle, m.min(n - 1)).expect("valid dimensions"),
    );
    let mut ids: Vec<usize> = (1..=n).collect();
    ids.shuffle(&mut rng);
    let tour = Tour::new(ids).expect("shuffled ids form a permutation");
    Instance {
        oracle,
        neighborhoods,
        tour,
    }
}

fn is_permutation(tour: &Tour) -> bool {
    let mut ids = tour.to_ids();
    ids.sort_unstable();
    ids == (1..=tour.len()).collect::<Vec<_>>()
}

fn policy() -> impl Strategy<Value = ImprovementSelectionPolicy> {
    prop_oneof![
        Just(ImprovementSelectionPolicy::FirstImprovement),
        Just(ImprovementSelectionPolicy::BestImprovement),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_search_never_lengthens_the_tour(seed in any::<u64>(), n in 4usize..60, m in 2usize..10, policy in policy()) {
        let Instance { oracle, neighborhoods, mut tour } = random_instance(seed, n, m);
        let engine = MultiNeighborhoodSearchEngine::new(
            SearchConfig::builder().with_policy(policy).build().expect("valid config"),
        );

        let before: i64 = tour.length(&oracle);
        let outcome = engine.optimize(&mut tour, &oracle, &neighborhoods);

        prop_assert!(is_permutation(&tour));
        prop_assert!(outcome.is_local_optimum());
        prop_assert_eq!(outcome.initial_length(), before);
        prop_assert_eq!(outcome.final_length(), tour.length(&oracle));
        prop_assert!(outcome.final_length() <= before);
        if outcome.statistics().applied_moves > 0 {
            prop_assert!(outcome.final_length() < before);
        }
    }

    #[test]
    fn prop_local_optimum_is_a_fixed_point(seed in any::<u64>(), n in 4usize..50, policy in policy()) {
        let Instance { oracle, neighborhoods, mut tour } = random_instance(seed, n, 6);
        let engine = MultiNeighborhoodSearchEngine::new(
            SearchConfig::builder().with_policy(policy).build().expect("valid config"),
        );

        engine.optimize(&mut tour, &oracle, &neighborhoods);
        let optimum = tour.clone();
        let outcome = engine.optimize(&mut tour, &oracle, &neighborhoods);

        prop_assert_eq!(&tour, &optimum);
        prop_assert_eq!(outcome.statistics().applied_moves, 0);
    }

    #[test]
    fn prop_mutation_children_are_valid(seed in any::<u64>(), n in 8usize..40) {
        let Instance { oracle, neighborhoods, tour: parent } = random_instance(seed, n, 5);
        let mutation = LocalSearchMutation::<i64>::default();
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));

        let outcome = mutation.mutate_detailed(&parent, &oracle, &neighborhoods, &mut rng);
        prop_assert!(is_permutation(outcome.tour()));
        prop_assert_eq!(outcome.is_distinct(), !outcome.tour().is_same_cycle(&parent));
        prop_assert!(outcome.attempts() <= mutation.config().max_attempts());
        prop_assert_eq!(outcome.length(), outcome.tour().length(&oracle));
    }
}

#[test]
fn test_monitored_run_matches_unmonitored_run() {
    init_tracing();
    let Instance {
        oracle,
        neighborhoods,
        tour,
    } = random_instance(2025, 120, 8);
    let engine = MultiNeighborhoodSearchEngine::<i64>::default();

    let mut plain = tour.clone();
    let plain_outcome = engine.optimize(&mut plain, &oracle, &neighborhoods);

    let mut logged = tour.clone();
    let mut monitor = LogMonitor::default();
    let logged_outcome = engine.run(&mut logged, &oracle, &neighborhoods, &mut monitor);

    assert_eq!(plain, logged);
    assert_eq!(plain_outcome.final_length(), logged_outcome.final_length());
    assert_eq!(monitor.current_length(), Some(logged_outcome.final_length()));
}

#[test]
fn test_mutating_local_optima_yields_new_cycles() {
    let mut total = 0usize;
    let mut distinct = 0usize;

    for seed in 0..20 {
        let Instance {
            oracle,
            neighborhoods,
            tour: mut parent,
        } = random_instance(seed, 30, 6);
        let mutation = LocalSearchMutation::<i64>::default();
        mutation.engine().optimize(&mut parent, &oracle, &neighborhoods);
        let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);

        for _ in 0..20 {
            let outcome = mutation.mutate_detailed(&parent, &oracle, &neighborhoods, &mut rng);
            let new_cycle = !outcome.tour().is_same_cycle(&parent);
            assert_eq!(outcome.is_distinct(), new_cycle);
            if !new_cycle {
                assert_eq!(outcome.attempts(), mutation.config().max_attempts());
            }
            total += 1;
            distinct += usize::from(new_cycle);
        }
    }

    assert!(
        distinct * 10 >= total * 8,
        "only {distinct} of {total} children differ from their parent"
    );
}
