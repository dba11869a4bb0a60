use std::io::Write;

use strand_core::{ObjectKind, ReportError};
use strand_state::{FiberEnd, SimObject, SimulationState};

use super::{fixed, object_prefix};

pub(crate) fn solids(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(out, "% class id centroid point_0 point_1 folded_centroid")?;
    let modulo = state.modulo();
    for solid in &state.solids {
        let centroid = solid.centroid();
        write!(
            out,
            "{}   {}",
            object_prefix(solid.property(), solid.number()),
            fixed(&centroid, 9, 4)
        )?;
        for point in solid.points().iter().take(2) {
            write!(out, "   {}", fixed(point, 9, 4))?;
        }
        if let Some(space) = modulo {
            write!(out, "   {}", fixed(&space.fold(centroid), 9, 4))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub(crate) fn spheres(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(out, "% class id center point_1")?;
    for sphere in &state.spheres {
        write!(out, "{}", object_prefix(sphere.property(), sphere.number()))?;
        for point in sphere.points().iter().take(2) {
            write!(out, "   {}", fixed(point, 9, 4))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub(crate) fn spaces(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(out, "% class id")?;
    for space in &state.spaces {
        writeln!(out, "{}", object_prefix(space.property(), space.number()))?;
    }
    Ok(())
}

pub(crate) fn organizers(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(out, "% class id position nb_organized")?;
    for organizer in &state.organizers {
        writeln!(
            out,
            "{}   {}   {}",
            object_prefix(organizer.property(), organizer.number()),
            fixed(&organizer.position(), 9, 5),
            organizer.nb_organized()
        )?;
    }
    Ok(())
}

pub(crate) fn time(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(out, "% time")?;
    writeln!(out, "{:.6}", state.time)?;
    Ok(())
}

pub(crate) fn parameters(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(out, "% parameters of {} classes", state.properties.iter().count())?;
    for kind in ObjectKind::ALL {
        for prop in state.properties.find_all(kind) {
            writeln!(out, "% {kind} {}", prop.name())?;
            for (key, value) in prop.parameters() {
                writeln!(out, "{key} = {value}")?;
            }
        }
    }
    Ok(())
}

pub(crate) fn custom(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(out, "% end-to-end distance of fibers")?;
    for fiber in &state.fibers {
        let distance = (fiber.pos_end(FiberEnd::Plus) - fiber.pos_end(FiberEnd::Minus)).norm();
        write!(out, "{distance:.6} ")?;
    }
    writeln!(out)?;
    Ok(())
}
