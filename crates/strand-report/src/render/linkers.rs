use std::io::Write;

use strand_analysis::{bead_single_counts, couple_state_counts, single_state_counts};
use strand_core::{ObjectKind, ReportError};
use strand_state::{CoupleState, SimObject, SimulationState, SingleState};

use super::{fixed, object_prefix};

const PRECISION: usize = 4;

pub(crate) fn bead_positions(
    state: &SimulationState,
    out: &mut dyn Write,
) -> Result<(), ReportError> {
    writeln!(out, "% class id position")?;
    for bead in &state.beads {
        writeln!(
            out,
            "{}   {}",
            object_prefix(bead.property(), bead.number()),
            fixed(&bead.position(), 9, PRECISION)
        )?;
    }
    Ok(())
}

pub(crate) fn bead_singles(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(out, "% beads: amount(nb_attached_hands)")?;
    let counts = bead_single_counts(state);
    for count in counts.counts {
        write!(out, " {count:>3}")?;
    }
    writeln!(out)?;
    Ok(())
}

pub(crate) fn single_counts(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(
        out,
        "{:<16} {:>8} {:>8} {:>8}",
        "% Single", "Total", "Free", "Bound"
    )?;
    let counts = single_state_counts(state);
    for (prop, entry) in state
        .properties
        .find_all(ObjectKind::Single)
        .into_iter()
        .zip(counts)
    {
        writeln!(
            out,
            "{:<16} {:>8} {:>8} {:>8}",
            prop.name(),
            entry.total,
            entry.free,
            entry.bound
        )?;
    }
    Ok(())
}

/// Free singles first, then attached ones, each in registry order.
pub(crate) fn single_positions(
    state: &SimulationState,
    out: &mut dyn Write,
    class: Option<usize>,
    attached_only: bool,
) -> Result<(), ReportError> {
    writeln!(out, "% class id state position force")?;
    for sub_state in SingleState::ALL {
        if attached_only && sub_state == SingleState::Free {
            continue;
        }
        let selected = state.singles.iter().filter(|single| {
            single.state() == sub_state && class.map_or(true, |class| single.property() == class)
        });
        for single in selected {
            writeln!(
                out,
                "{}  {}  {}  {}",
                object_prefix(single.property(), single.number()),
                sub_state.flag(),
                fixed(&single.position(), 9, PRECISION),
                fixed(&single.force(), 9, PRECISION),
            )?;
        }
    }
    Ok(())
}

pub(crate) fn couple_counts(state: &SimulationState, out: &mut dyn Write) -> Result<(), ReportError> {
    writeln!(
        out,
        "{:<16} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "% Couple", "Total", "FF", "AF", "FA", "AA"
    )?;
    let counts = couple_state_counts(state);
    for (prop, entry) in state
        .properties
        .find_all(ObjectKind::Couple)
        .into_iter()
        .zip(counts)
    {
        write!(out, "{:<16} {:>8}", prop.name(), entry.total)?;
        for count in entry.states {
            write!(out, " {count:>8}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Couples grouped by attachment state in FF, AF, FA, AA order.
pub(crate) fn couple_positions(
    state: &SimulationState,
    out: &mut dyn Write,
    class: Option<usize>,
) -> Result<(), ReportError> {
    writeln!(out, "% class id state1 state2 position")?;
    for sub_state in CoupleState::ALL {
        let (first, second) = sub_state.flags();
        let selected = state.couples.iter().filter(|couple| {
            couple.state() == sub_state && class.map_or(true, |class| couple.property() == class)
        });
        for couple in selected {
            writeln!(
                out,
                "{} {first} {second}   {}",
                object_prefix(couple.property(), couple.number()),
                fixed(&couple.position(), 9, PRECISION),
            )?;
        }
    }
    Ok(())
}
