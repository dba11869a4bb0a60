#![allow(dead_code)]

use strand_core::{ObjectKind, Options, Vector};
use strand_state::{Hand, RecordedForces, SimulationState, StateBuilder};
use strand_report::Reporter;

/// Three actin fibers of lengths 2, 3 and 4 plus one tubulin fiber, with
/// linkers, beads and rigid bodies around them.
pub fn sample_state() -> SimulationState {
    let mut builder = StateBuilder::new(0x5EED);
    builder.time(3.25);
    let actin = builder
        .class_with(ObjectKind::Fiber, "actin", &[("rigidity", "0.075"), ("segmentation", "0.5")])
        .unwrap();
    let tubulin = builder.class(ObjectKind::Fiber, "tubulin").unwrap();

    let mut fibers = Vec::new();
    for (idx, length) in [2.0, 3.0, 4.0].into_iter().enumerate() {
        let origin = Vector::new(-1.0, idx as f64, 0.0);
        fibers.push(
            builder
                .straight_fiber(actin, origin, Vector::x(), length, 4)
                .unwrap(),
        );
    }
    let microtubule = builder
        .straight_fiber(tubulin, Vector::new(0.0, 0.0, 2.0), Vector::y(), 5.0, 5)
        .unwrap();
    builder
        .fiber_mut(fibers[0])
        .unwrap()
        .set_recorded_forces(
            vec![Vector::new(0.0, 0.1, 0.0); 5],
            vec![0.5, 1.5, 2.5, 3.5],
        )
        .unwrap();
    builder.fiber_mut(fibers[1]).unwrap().set_abscissa_minus(-1.5);
    builder.fiber_mut(microtubule).unwrap().set_dynamic_states(4, 1);

    let motor = builder.class(ObjectKind::Couple, "motor").unwrap();
    let linker = builder.class(ObjectKind::Couple, "linker").unwrap();
    builder.couple(motor, Vector::new(5.0, 5.0, 0.0));
    let half = builder.couple(motor, Vector::zeros());
    builder
        .attach_couple(half, Hand::First, fibers[2], 1.0)
        .unwrap();
    builder
        .bridge(linker, (fibers[0], 0.5), (fibers[1], 0.5))
        .unwrap();

    let bead_class = builder.class(ObjectKind::Bead, "bead").unwrap();
    let grafted = builder.class(ObjectKind::Single, "grafted").unwrap();
    let loaded = builder.bead(bead_class, Vector::new(0.0, 0.5, 0.0));
    builder.bead(bead_class, Vector::new(3.0, 3.0, 3.0));
    let anchor = builder.single(grafted, Vector::new(0.0, 0.5, 0.0));
    builder.graft_single(anchor, loaded).unwrap();
    builder
        .attach_single(anchor, fibers[0], 0.3, Vector::new(0.0, -0.2, 0.0))
        .unwrap();
    builder.single(grafted, Vector::new(1.0, 1.0, 1.0));

    let body = builder.class(ObjectKind::Solid, "body").unwrap();
    builder.solid(
        body,
        vec![Vector::new(6.0, 0.0, 0.0), Vector::new(8.0, 0.0, 0.0)],
    );
    let ball = builder.class(ObjectKind::Sphere, "ball").unwrap();
    builder.sphere(ball, vec![Vector::zeros(), Vector::new(0.0, 0.0, 1.0)]);
    let aster = builder.class(ObjectKind::Organizer, "aster").unwrap();
    builder.organizer(aster, Vector::new(1.0, 2.0, 3.0), 4);
    let cell = builder.class(ObjectKind::Space, "cell").unwrap();
    builder.space(cell, Some(Vector::new(10.0, 10.0, 0.0)));

    builder.build().unwrap()
}

/// Runs one query against `state` and returns the text.
pub fn render(state: &SimulationState, query: &str, options: &Options) -> String {
    let solver = RecordedForces;
    let reporter = Reporter::new(state, &solver);
    let mut out = Vec::new();
    reporter.report(&mut out, query, options).unwrap();
    String::from_utf8(out).unwrap()
}

/// Non-comment, non-empty lines.
pub fn data_lines(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('%'))
        .collect()
}
