use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use fleet_routing::clustering::kmeans;
use fleet_routing::constructive::{Construction, NearestNeighbor};
use fleet_routing::distance::tour_length;
use fleet_routing::models::Point;
use fleet_routing::search::{AnytimeSearch, CancellationToken, SearchConfig};

fn points(max: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 1..max)
        .prop_map(|v| v.into_iter().map(Point::from).collect())
}

proptest! {
    #[test]
    fn prop_unbounded_tour_is_permutation(pts in points(40), seed in any::<u64>(), start_frac in 0.0f64..1.0) {
        let n = pts.len();
        let start = ((n as f64 * start_frac) as usize).min(n - 1);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = NearestNeighbor::new()
            .construct(&pts, start, f64::INFINITY, &mut rng)
            .unwrap();
        let (tour, distance) = result.into_tour().unwrap();
        prop_assert!(tour.is_permutation_of(n));
        prop_assert_eq!(tour.start(), Some(start));
        prop_assert!((tour_length(&pts, &tour) - distance).abs() < 1e-6);
    }

    #[test]
    fn prop_zero_bound_always_prunes(pts in points(30), seed in any::<u64>()) {
        prop_assume!(pts.len() > 1);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = NearestNeighbor::new().construct(&pts, 0, 0.0, &mut rng).unwrap();
        prop_assert_eq!(result, Construction::Pruned);
    }

    #[test]
    fn prop_completed_tour_beats_bound(pts in points(30), seed in any::<u64>(), bound in 0.0f64..20_000.0) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = NearestNeighbor::new().construct(&pts, 0, bound, &mut rng).unwrap();
        if let Construction::Complete { distance, .. } = result {
            prop_assert!(pts.len() == 1 || distance < bound);
        }
    }

    #[test]
    fn prop_kmeans_partitions_indices(pts in points(60), k_frac in 0.0f64..1.0, seed in any::<u64>()) {
        let n = pts.len();
        let k = 1 + ((n as f64 * k_frac) as usize).min(n - 1);
        let partition = kmeans(&pts, k, seed).unwrap();
        prop_assert_eq!(partition.clusters.len(), k);
        let mut all: Vec<usize> = partition
            .clusters
            .iter()
            .flat_map(|c| c.members().iter().copied())
            .collect();
        all.sort();
        prop_assert_eq!(all, (0..n).collect::<Vec<_>>());
        for c in &partition.clusters {
            prop_assert!(c.centroid().is_finite());
        }
    }

    #[test]
    fn prop_kmeans_reproducible(pts in points(40), seed in any::<u64>()) {
        let k = pts.len().min(4);
        prop_assert_eq!(kmeans(&pts, k, seed).unwrap(), kmeans(&pts, k, seed).unwrap());
    }

    #[test]
    fn prop_search_never_regresses(pts in points(30), seed in any::<u64>()) {
        let search = AnytimeSearch::new(
            SearchConfig::default()
                .with_max_attempts(30)
                .with_seed(seed),
        );
        let outcome = search.run(&pts, 0, &CancellationToken::new()).unwrap();
        prop_assert!(outcome.distance <= outcome.baseline_distance);
        for w in outcome.improvements.windows(2) {
            prop_assert!(w[1] < w[0]);
        }
        prop_assert!(outcome.tour.is_permutation_of(pts.len()));
    }
}
