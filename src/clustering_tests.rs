//! End-to-end properties of the recursive clusterer.

use crate::cluster::{ClusterConfig, RecursiveClusterer};
use crate::community::{ConnectedComponents, Mcl};
use crate::distance::DistanceIndex;
use crate::observer::{Event, NoopObserver, RecordingObserver};
use crate::Result;
use proptest::prelude::*;

/// Symmetric matrix over `n` entities from the upper triangle `cells`.
fn index_from_cells(n: usize, cells: &[f64]) -> Result<DistanceIndex> {
    let mut rows = vec![vec![0.0; n]; n];
    let mut k = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            rows[i][j] = cells[k % cells.len()];
            rows[j][i] = rows[i][j];
            k += 1;
        }
    }
    let names = (0..n).map(|i| format!("font-{i:02}")).collect();
    DistanceIndex::new(names, rows)
}

fn matrix() -> impl Strategy<Value = (usize, Vec<f64>)> {
    (1usize..16).prop_flat_map(|n| {
        let pairs = (n * (n - 1) / 2).max(1);
        (Just(n), proptest::collection::vec(0.0f64..1.0, pairs))
    })
}

#[test]
fn test_spread_out_entities_end_in_singletons() -> Result<()> {
    // Every distance distinct, so some pair always falls under the floor quantile.
    let n = 8;
    let cells: Vec<f64> = (1..=n * (n - 1) / 2).map(|k| k as f64 / 100.0).collect();
    let index = index_from_cells(n, &cells)?;

    let hierarchy = RecursiveClusterer::new(ConnectedComponents::new())
        .with_observer(NoopObserver)
        .cluster(&index)?;

    assert_eq!(hierarchy.entity_count(), n);
    assert!(hierarchy.validate_partition(index.names(), 5).is_healthy());
    Ok(())
}

#[test]
fn test_identical_distances_fall_apart_into_singletons() -> Result<()> {
    // Every quantile is the shared distance and edges need d < threshold.
    let index = index_from_cells(9, &[0.3])?;
    let observer = RecordingObserver::default();

    let hierarchy = RecursiveClusterer::new(ConnectedComponents::new())
        .with_observer(&observer)
        .cluster(&index)?;

    assert_eq!(hierarchy.leaf_count(), 9);
    assert_eq!(hierarchy.depth(), 0);
    assert_eq!(observer.attempts().len(), 1);
    Ok(())
}

#[test]
fn test_larger_cap_keeps_hierarchy_flat() -> Result<()> {
    let index = index_from_cells(10, &[0.2, 0.4, 0.6, 0.8, 0.5])?;
    let config = ClusterConfig::default().with_max_cluster_size(10);

    let hierarchy = RecursiveClusterer::new(Mcl::new())
        .with_config(config)
        .with_observer(NoopObserver)
        .cluster(&index)?;

    assert_eq!(hierarchy.depth(), 0);
    assert_eq!(hierarchy.entity_count(), 10);
    Ok(())
}

proptest! {
    #[test]
    fn components_partition_every_entity_once((n, cells) in matrix()) {
        let index = index_from_cells(n, &cells).unwrap();
        let hierarchy = RecursiveClusterer::new(ConnectedComponents::new())
            .with_observer(NoopObserver)
            .cluster(&index)
            .unwrap();

        let report = hierarchy.validate_partition(index.names(), 5);
        prop_assert!(report.is_healthy(), "{}", report);
        prop_assert_eq!(hierarchy.entity_count(), n);
    }

    #[test]
    fn oversized_leaves_come_only_from_irreducible_groups((n, cells) in matrix()) {
        let index = index_from_cells(n, &cells).unwrap();
        let observer = RecordingObserver::default();
        let hierarchy = RecursiveClusterer::new(ConnectedComponents::new())
            .with_observer(&observer)
            .cluster(&index)
            .unwrap();

        let irreducible = observer
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::NonConvergent { size, .. } if *size > 5))
            .count();
        prop_assert_eq!(hierarchy.stats(5).oversized_leaves, irreducible);
    }

    #[test]
    fn components_runs_are_deterministic((n, cells) in matrix()) {
        let index = index_from_cells(n, &cells).unwrap();
        let clusterer = RecursiveClusterer::new(ConnectedComponents::new()).with_observer(NoopObserver);
        prop_assert_eq!(clusterer.cluster(&index).unwrap(), clusterer.cluster(&index).unwrap());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn mcl_partitions_every_entity_once((n, cells) in matrix()) {
        let index = index_from_cells(n, &cells).unwrap();
        let clusterer = RecursiveClusterer::new(Mcl::new()).with_observer(NoopObserver);
        let hierarchy = clusterer.cluster(&index).unwrap();

        let report = hierarchy.validate_partition(index.names(), 5);
        prop_assert!(report.is_healthy(), "{}", report);
        prop_assert_eq!(&hierarchy, &clusterer.cluster(&index).unwrap());
    }
}
