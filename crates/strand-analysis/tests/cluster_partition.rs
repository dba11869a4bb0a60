use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use strand_analysis::{analyze_clusters, fiber_clusters};
use strand_core::{ObjectKind, ObjectNumber, Vector};
use strand_state::StateBuilder;

fn num(raw: u32) -> ObjectNumber {
    ObjectNumber::from_raw(raw)
}

/// Relabel-on-merge reference: every fiber carrying the larger label takes the smaller one.
fn relabel_reference(fibers: &[u32], bridges: &[(u32, u32)]) -> BTreeMap<u32, u32> {
    let mut labels: BTreeMap<u32, u32> = fibers.iter().map(|&f| (f, f)).collect();
    for &(a, b) in bridges {
        let (Some(&la), Some(&lb)) = (labels.get(&a), labels.get(&b)) else {
            continue;
        };
        if la != lb {
            let (low, high) = if la < lb { (la, lb) } else { (lb, la) };
            for label in labels.values_mut() {
                if *label == high {
                    *label = low;
                }
            }
        }
    }
    labels
}

fn partition(labels: impl Iterator<Item = (u32, u32)>) -> BTreeSet<BTreeSet<u32>> {
    let mut groups: BTreeMap<u32, BTreeSet<u32>> = BTreeMap::new();
    for (fiber, label) in labels {
        groups.entry(label).or_default().insert(fiber);
    }
    groups.into_values().collect()
}

#[test]
fn unbridged_fibers_keep_distinct_labels() {
    let mut builder = StateBuilder::new(0);
    let actin = builder.class(ObjectKind::Fiber, "actin").unwrap();
    let f1 = builder
        .fiber_with_signature(actin, 12345, vec![Vector::zeros(), Vector::x()])
        .unwrap();
    let f2 = builder
        .fiber_with_signature(actin, 67890, vec![Vector::y(), Vector::y() + Vector::x()])
        .unwrap();
    let motor = builder.class(ObjectKind::Couple, "motor").unwrap();
    let couple = builder.couple(motor, Vector::zeros());
    builder
        .attach_couple(couple, strand_state::Hand::First, f1, 0.5)
        .unwrap();
    let state = builder.build().unwrap();

    let map = fiber_clusters(&state);
    assert_ne!(map.label(f1), map.label(f2));
    assert_eq!(map.len(), 2);
}

#[test]
fn one_bridge_joins_two_fibers() {
    let mut builder = StateBuilder::new(0);
    let actin = builder.class(ObjectKind::Fiber, "actin").unwrap();
    let f1 = builder
        .fiber_with_signature(actin, 12345, vec![Vector::zeros(), Vector::x()])
        .unwrap();
    let f2 = builder
        .fiber_with_signature(actin, 67890, vec![Vector::y(), Vector::y() + Vector::x()])
        .unwrap();
    let motor = builder.class(ObjectKind::Couple, "motor").unwrap();
    builder.bridge(motor, (f2, 0.1), (f1, 0.9)).unwrap();
    let state = builder.build().unwrap();

    let map = fiber_clusters(&state);
    assert_eq!(map.label(f1), map.label(f2));
    assert_eq!(map.label(f2), Some(f1));
    assert_eq!(map.len(), 1);
    let clusters = map.clusters();
    assert_eq!(clusters[&f1], BTreeSet::from([f1, f2]));
}

#[test]
fn labels_are_lowest_member_numbers() {
    let fibers = [7, 3, 9, 4, 12].map(num);
    let bridges = [(num(9), num(12)), (num(12), num(4)), (num(7), num(3))];
    let map = analyze_clusters(fibers, bridges);
    assert_eq!(map.label(num(9)), Some(num(4)));
    assert_eq!(map.label(num(12)), Some(num(4)));
    assert_eq!(map.label(num(7)), Some(num(3)));
    let sizes: Vec<usize> = map.clusters().values().map(BTreeSet::len).collect();
    assert_eq!(sizes, vec![2, 3]);
}

#[test]
fn bridges_to_unknown_fibers_are_skipped() {
    let map = analyze_clusters([num(1), num(2)], [(num(1), num(5)), (num(2), num(2))]);
    assert_eq!(map.label(num(1)), Some(num(1)));
    assert_eq!(map.label(num(2)), Some(num(2)));
    assert_eq!(map.label(num(5)), None);
}

#[test]
fn empty_input_yields_empty_map() {
    let map = analyze_clusters(Vec::<ObjectNumber>::new(), Vec::<(ObjectNumber, ObjectNumber)>::new());
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert!(map.clusters().is_empty());
}

proptest! {
    #[test]
    fn union_find_matches_relabel_reference(
        fibers in prop::collection::btree_set(1u32..60, 1..40),
        raw_bridges in prop::collection::vec((0usize..64, 0usize..64), 0..80),
    ) {
        let fibers: Vec<u32> = fibers.into_iter().collect();
        let bridges: Vec<(u32, u32)> = raw_bridges
            .iter()
            .map(|&(a, b)| (fibers[a % fibers.len()], fibers[b % fibers.len()]))
            .collect();

        let map = analyze_clusters(
            fibers.iter().copied().map(num),
            bridges.iter().map(|&(a, b)| (num(a), num(b))),
        );
        let reference = relabel_reference(&fibers, &bridges);
        for (&fiber, &label) in &reference {
            prop_assert_eq!(map.label(num(fiber)), Some(num(label)));
        }
    }

    #[test]
    fn partition_ignores_bridge_order_and_repeats(
        fibers in prop::collection::btree_set(1u32..40, 1..30),
        raw_bridges in prop::collection::vec((0usize..64, 0usize..64), 0..50),
        rotation in 0usize..50,
    ) {
        let fibers: Vec<u32> = fibers.into_iter().collect();
        let bridges: Vec<(ObjectNumber, ObjectNumber)> = raw_bridges
            .iter()
            .map(|&(a, b)| (num(fibers[a % fibers.len()]), num(fibers[b % fibers.len()])))
            .collect();
        let mut shuffled = bridges.clone();
        shuffled.reverse();
        if !shuffled.is_empty() {
            let shift = rotation % shuffled.len();
            shuffled.rotate_left(shift);
        }

        let numbers = || fibers.iter().copied().map(num);
        let first = analyze_clusters(numbers(), bridges.iter().copied());
        let again = analyze_clusters(numbers(), bridges.iter().copied());
        let permuted = analyze_clusters(numbers(), shuffled);

        let as_raw = |map: &strand_analysis::ClusterMap| {
            partition(map.iter().map(|(f, l)| (f.as_raw(), l.as_raw())))
        };
        prop_assert_eq!(&first, &again);
        prop_assert_eq!(as_raw(&first), as_raw(&permuted));
    }
}
