use proptest::prelude::*;
use strand_analysis::{
    bead_single_counts, class_counts, couple_state_counts, dynamic_counts, fiber_lengths,
    segment_summary, single_state_counts, tension_summary, Histogram, LengthSummary, Plane,
};
use strand_core::{ObjectKind, ReportError, Vector};
use strand_state::{FiberEnd, ForceSolver, Hand, RecordedForces, SimulationState, StateBuilder};

fn actin_lengths(lengths: &[f64]) -> SimulationState {
    let mut builder = StateBuilder::new(11);
    let actin = builder.class(ObjectKind::Fiber, "actin").unwrap();
    builder.class(ObjectKind::Fiber, "tubulin").unwrap();
    for (idx, &length) in lengths.iter().enumerate() {
        builder
            .straight_fiber(actin, Vector::new(0.0, idx as f64, 0.0), Vector::x(), length, 4)
            .unwrap();
    }
    builder.build().unwrap()
}

#[test]
fn length_summary_of_three_fibers() {
    let state = actin_lengths(&[2.0, 3.0, 4.0]);
    let summary = fiber_lengths(state.fibers.of_class(0));
    assert_eq!(summary.count, 3);
    assert!((summary.mean - 3.0).abs() < 1e-12);
    assert!((summary.std_dev - 0.816).abs() < 1e-3);
    assert!((summary.total - 9.0).abs() < 1e-12);
    assert_eq!(fiber_lengths(state.fibers.of_class(1)), LengthSummary::default());
}

#[test]
fn histogram_boundaries_go_to_the_upper_bin() {
    let mut histogram = Histogram::new(1.0, 3.0).unwrap();
    for value in [0.0, 0.999, 1.0, 2.5, 3.0, 7.0, -1.0] {
        histogram.add(value);
    }
    assert_eq!(histogram.nb_bins(), 3);
    assert_eq!(histogram.counts(), &[3, 1, 1, 2]);
    assert_eq!(histogram.lower_edges(), vec![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn histogram_rounds_bin_count_up() {
    let histogram = Histogram::new(0.3, 1.0).unwrap();
    assert_eq!(histogram.nb_bins(), 4);
}

#[test]
fn histogram_rejects_bad_parameters() {
    for (width, max, key) in [(0.0, 1.0, "interval"), (-2.0, 1.0, "interval"), (1.0, 0.0, "max")] {
        match Histogram::new(width, max) {
            Err(ReportError::InvalidParameter(info)) => {
                assert_eq!(info.context.get("key").map(String::as_str), Some(key));
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }
}

#[test]
fn segments_count_joints_and_kinks() {
    let mut builder = StateBuilder::new(3);
    let actin = builder.class(ObjectKind::Fiber, "actin").unwrap();
    builder
        .fiber(
            actin,
            vec![
                Vector::zeros(),
                Vector::new(1.0, 0.0, 0.0),
                Vector::new(0.5, 0.0, 0.0),
                Vector::new(0.5, 2.0, 0.0),
            ],
        )
        .unwrap();
    builder
        .straight_fiber(actin, Vector::zeros(), Vector::y(), 3.0, 2)
        .unwrap();
    let state = builder.build().unwrap();
    let summary = segment_summary(state.fibers.of_class(actin));
    assert_eq!(summary.fibers, 2);
    assert_eq!(summary.joints, 3);
    assert_eq!(summary.kinks, 1);
    assert!((summary.min_segment - 0.5).abs() < 1e-12);
    assert!((summary.max_segment - 2.0).abs() < 1e-12);
}

#[test]
fn dynamic_states_are_tallied_per_end() {
    let mut builder = StateBuilder::new(4);
    let actin = builder.class(ObjectKind::Fiber, "actin").unwrap();
    for (minus, plus) in [(0, 1), (0, 1), (4, 2), (9, 0)] {
        let fiber = builder
            .straight_fiber(actin, Vector::zeros(), Vector::x(), 1.0, 1)
            .unwrap();
        builder.fiber_mut(fiber).unwrap().set_dynamic_states(minus, plus);
    }
    let state = builder.build().unwrap();
    let plus = dynamic_counts(&state.fibers, FiberEnd::Plus);
    assert_eq!(plus.total, 4);
    assert_eq!(plus.states, [1, 2, 1, 0, 0]);
    let minus = dynamic_counts(&state.fibers, FiberEnd::Minus);
    assert_eq!(minus.total, 4);
    assert_eq!(minus.states, [2, 0, 0, 0, 1]);
}

#[test]
fn tensions_sum_over_plane_crossings() {
    let mut builder = StateBuilder::new(5);
    let actin = builder.class(ObjectKind::Fiber, "actin").unwrap();
    let fiber = builder
        .straight_fiber(actin, Vector::new(-1.5, 0.0, 0.0), Vector::x(), 3.0, 3)
        .unwrap();
    builder
        .fiber_mut(fiber)
        .unwrap()
        .set_recorded_forces(Vec::new(), vec![1.0, 2.0, 4.0])
        .unwrap();
    let state = builder.build().unwrap();
    let field = RecordedForces.compute_forces(&state).unwrap();

    let all = tension_summary(&state, &field, None);
    assert_eq!(all.count, 3);
    assert!((all.total - 7.0).abs() < 1e-12);

    let plane = Plane::from_values(&[1.0, 0.0, 0.0]).unwrap();
    let middle = tension_summary(&state, &field, Some(&plane));
    assert_eq!(middle.count, 1);
    assert!((middle.total - 2.0).abs() < 1e-12);

    let shifted = Plane::from_values(&[1.0, 0.0, 0.0, -1.0]).unwrap();
    let last = tension_summary(&state, &field, Some(&shifted));
    assert_eq!(last.count, 1);
    assert!((last.total - 4.0).abs() < 1e-12);

    assert!(Plane::from_values(&[1.0, 0.0]).is_err());
}

#[test]
fn beads_are_classified_by_attached_singles() {
    let mut builder = StateBuilder::new(6);
    let actin = builder.class(ObjectKind::Fiber, "actin").unwrap();
    let fiber = builder
        .straight_fiber(actin, Vector::zeros(), Vector::x(), 5.0, 5)
        .unwrap();
    let bead_class = builder.class(ObjectKind::Bead, "bead").unwrap();
    let grafted = builder.class(ObjectKind::Single, "grafted").unwrap();
    let lonely = builder.bead(bead_class, Vector::zeros());
    let busy = builder.bead(bead_class, Vector::y());
    let _empty = builder.bead(bead_class, Vector::z());
    for idx in 0..3 {
        let single = builder.single(grafted, Vector::zeros());
        builder.graft_single(single, busy).unwrap();
        if idx < 2 {
            builder
                .attach_single(single, fiber, idx as f64, Vector::zeros())
                .unwrap();
        }
    }
    let free = builder.single(grafted, Vector::zeros());
    builder.graft_single(free, lonely).unwrap();
    let state = builder.build().unwrap();

    let counts = bead_single_counts(&state);
    assert_eq!(counts.counts[0], 2);
    assert_eq!(counts.counts[2], 1);
    assert_eq!(counts.counts.iter().sum::<usize>(), state.beads.len());
}

#[test]
fn linker_states_are_counted_per_class() {
    let mut builder = StateBuilder::new(7);
    let actin = builder.class(ObjectKind::Fiber, "actin").unwrap();
    let f1 = builder
        .straight_fiber(actin, Vector::zeros(), Vector::x(), 2.0, 2)
        .unwrap();
    let f2 = builder
        .straight_fiber(actin, Vector::y(), Vector::x(), 2.0, 2)
        .unwrap();
    let motor = builder.class(ObjectKind::Couple, "motor").unwrap();
    let linker = builder.class(ObjectKind::Couple, "linker").unwrap();
    builder.couple(motor, Vector::zeros());
    let half = builder.couple(motor, Vector::zeros());
    builder.attach_couple(half, Hand::Second, f1, 0.5).unwrap();
    builder.bridge(linker, (f1, 1.0), (f2, 1.0)).unwrap();
    let hand = builder.class(ObjectKind::Single, "hand").unwrap();
    builder.single(hand, Vector::zeros());
    let bound = builder.single(hand, Vector::zeros());
    builder.attach_single(bound, f2, 0.2, Vector::x()).unwrap();
    let state = builder.build().unwrap();

    let couples = couple_state_counts(&state);
    assert_eq!(couples.len(), 2);
    assert_eq!(couples[motor].total, 2);
    assert_eq!(couples[motor].states, [1, 0, 1, 0]);
    assert_eq!(couples[linker].states, [0, 0, 0, 1]);

    let singles = single_state_counts(&state);
    assert_eq!(singles[hand].total, 2);
    assert_eq!((singles[hand].free, singles[hand].bound), (1, 1));
}

proptest! {
    #[test]
    fn histogram_counts_sum_to_samples(
        width in 0.05f64..5.0,
        max in 0.1f64..50.0,
        values in prop::collection::vec(-5.0f64..80.0, 0..200),
    ) {
        let mut histogram = Histogram::new(width, max).unwrap();
        for &value in &values {
            histogram.add(value);
        }
        prop_assert_eq!(histogram.total(), values.len() as u64);
        prop_assert_eq!(histogram.counts().len(), histogram.nb_bins() + 1);
    }

    #[test]
    fn class_counts_partition_the_registry(classes in prop::collection::vec(0usize..4, 1..40)) {
        let mut builder = StateBuilder::new(9);
        for name in ["a", "b", "c", "d"] {
            builder.class(ObjectKind::Bead, name).unwrap();
        }
        for &class in &classes {
            builder.bead(class, Vector::zeros());
        }
        let state = builder.build().unwrap();
        let counts = class_counts(&state.beads, 4);
        for class in 0..4 {
            let expected = classes.iter().filter(|&&c| c == class).count();
            prop_assert_eq!(counts.count(class), expected);
        }
        prop_assert_eq!(counts.per_class().iter().sum::<usize>(), counts.total());
        prop_assert_eq!(counts.total(), classes.len());
    }

    #[test]
    fn welford_matches_two_pass(values in prop::collection::vec(0.0f64..100.0, 1..60)) {
        let summary = LengthSummary::from_values(values.iter().copied());
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        prop_assert!((summary.mean - mean).abs() < 1e-9);
        prop_assert!((summary.std_dev - var.sqrt()).abs() < 1e-6);
    }
}
