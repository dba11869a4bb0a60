use std::io::Write;

use strand_analysis::{
    dynamic_counts, fiber_clusters, fiber_lengths, segment_summary, tension_summary, Histogram,
    Plane,
};
use strand_core::{ObjectKind, Options, ReportError};
use strand_state::{Fiber, FiberEnd, ForceSolver, SimObject, SimulationState};

use super::{fixed, object_prefix};

fn reference(state: &SimulationState, fiber: &Fiber) -> String {
    format!(
        "{}:{}",
        state.class_name(ObjectKind::Fiber, fiber.property()),
        fiber.number()
    )
}

pub(crate) fn listing(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(out, "% class id length center_position center_direction")?;
    for prop in state.properties.find_all(ObjectKind::Fiber) {
        writeln!(out, "% {}", prop.name())?;
        for fiber in state.fibers.of_class(prop.index()) {
            writeln!(
                out,
                "{}  {:>9.5}  {}  {}",
                object_prefix(prop.index(), fiber.number()),
                fiber.length(),
                fixed(&fiber.pos_end(FiberEnd::Center), 9, 5),
                fixed(&fiber.dir_end(FiberEnd::Center), 9, 5),
            )?;
        }
    }
    Ok(())
}

pub(crate) fn ends(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(
        out,
        "% class id length stateM positionM directionM stateP positionP directionP"
    )?;
    for fiber in &state.fibers {
        write!(
            out,
            "{}  {:>9.5}",
            object_prefix(fiber.property(), fiber.number()),
            fiber.length()
        )?;
        for end in [FiberEnd::Minus, FiberEnd::Plus] {
            write!(
                out,
                "  {}  {}  {}",
                fiber.dynamic_state(end),
                fixed(&fiber.pos_end(end), 9, 5),
                fixed(&fiber.dir_end(end), 9, 5),
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub(crate) fn points(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(out, "% id pos_x pos_y pos_z")?;
    for fiber in state.fibers.inventory() {
        writeln!(out, "% fiber {}", reference(state, fiber))?;
        for point in fiber.points() {
            writeln!(out, " {} {}", fiber.number(), fixed(point, 9, 5))?;
        }
    }
    Ok(())
}

pub(crate) fn forces(
    state: &SimulationState,
    solver: &dyn ForceSolver,
    out: &mut dyn Write,
) -> Result<(), ReportError> {
    let field = solver.compute_forces(state)?;
    writeln!(out, "% id point position force tension")?;
    for fiber in state.fibers.inventory() {
        writeln!(out, "% fiber {}", reference(state, fiber))?;
        for (point, pos) in fiber.points().iter().enumerate() {
            let tension = if point == fiber.last_point() {
                0.0
            } else {
                field.tension(fiber.number(), point)
            };
            writeln!(
                out,
                "{:<4}   {:<4}   {}   {}   {:>10.6}",
                fiber.number(),
                point,
                fixed(pos, 10, 6),
                fixed(&field.point_force(fiber.number(), point), 10, 6),
                tension,
            )?;
        }
    }
    Ok(())
}

pub(crate) fn speckles(
    state: &SimulationState,
    out: &mut dyn Write,
    options: &Options,
) -> Result<(), ReportError> {
    let interval = options.positive_or("interval", 1.0)?;
    writeln!(out, "% speckle positions, mean interval {interval}")?;
    for fiber in &state.fibers {
        let sampler = strand_analysis::speckles(fiber, interval)?;
        writeln!(out, "% fiber {}", reference(state, fiber))?;
        for abscissa in sampler {
            writeln!(out, "{}", fixed(&fiber.pos(abscissa), 10, 6))?;
        }
    }
    Ok(())
}

pub(crate) fn segments(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(out, "% fiber_name amount joints kinks min_seg max_seg")?;
    for prop in state.properties.find_all(ObjectKind::Fiber) {
        let summary = segment_summary(state.fibers.of_class(prop.index()));
        writeln!(
            out,
            "{:>10} {:>6} {:>6} {:>5} {:>7.5} {:>7.5}",
            prop.name(),
            summary.fibers,
            summary.joints,
            summary.kinks,
            summary.min_segment,
            summary.max_segment,
        )?;
    }
    Ok(())
}

pub(crate) fn lengths(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(
        out,
        "% {:>14} {:>8} {:>8} {:>8} {:>10}",
        "fiber", "count", "avg_len", "std_dev", "total"
    )?;
    for prop in state.properties.find_all(ObjectKind::Fiber) {
        let summary = fiber_lengths(state.fibers.of_class(prop.index()));
        writeln!(
            out,
            "{:>16} {:>8} {:>8.3} {:>8.3} {:>10.3}",
            prop.name(),
            summary.count,
            summary.mean,
            summary.std_dev,
            summary.total,
        )?;
    }
    Ok(())
}

pub(crate) fn length_distribution(
    state: &SimulationState,
    out: &mut dyn Write,
    options: &Options,
) -> Result<(), ReportError> {
    let width = options.positive_or("interval", 1.0)?;
    let max = options.positive_or("max", 10.0)?;
    let template = Histogram::new(width, max)?;
    write!(out, "% fiber_name")?;
    for edge in template.lower_edges() {
        write!(out, " {edge:>8.3}")?;
    }
    writeln!(out)?;
    for prop in state.properties.find_all(ObjectKind::Fiber) {
        let mut histogram = template.clone();
        for fiber in state.fibers.of_class(prop.index()) {
            histogram.add(fiber.length());
        }
        write!(out, "{:>12}", prop.name())?;
        for count in histogram.counts() {
            write!(out, " {count:>8}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub(crate) fn tensions(
    state: &SimulationState,
    solver: &dyn ForceSolver,
    out: &mut dyn Write,
    options: &Options,
) -> Result<(), ReportError> {
    let plane = options
        .vector("plane")?
        .map(|values| Plane::from_values(&values))
        .transpose()?;
    let field = solver.compute_forces(state)?;
    let summary = tension_summary(state, &field, plane.as_ref());
    match &plane {
        Some(plane) => writeln!(
            out,
            "% plane ({}).P + {} = 0",
            fixed(&plane.normal, 0, 3),
            plane.offset
        )?,
        None => writeln!(out, "% all segments")?,
    }
    writeln!(out, "% cnt force")?;
    writeln!(out, "{:>5} {:>8.6}", summary.count, summary.total)?;
    Ok(())
}

pub(crate) fn dynamics(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(out, "% fiber_end:total state:amount ...")?;
    for (label, end) in [(" plus_end", FiberEnd::Plus), ("minus_end", FiberEnd::Minus)] {
        let counts = dynamic_counts(&state.fibers, end);
        write!(out, "{label}:{:<8}", counts.total)?;
        for (dynamic_state, count) in counts.states.iter().enumerate() {
            write!(out, " {dynamic_state}:{count:<5}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub(crate) fn clusters(
    state: &SimulationState,
    out: &mut dyn Write,
    options: &Options,
) -> Result<(), ReportError> {
    let details = options.flag_or("details", true)?;
    let map = fiber_clusters(state);
    writeln!(out, "% cluster-index, number-of-fibers : name-of-fibers")?;
    for (label, members) in map.clusters() {
        write!(out, "{label}  {} :", members.len())?;
        if details {
            for member in &members {
                write!(out, " {member}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
